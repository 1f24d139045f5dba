//! Common model traits.

use std::cmp::Ordering;

use crate::array::dense::*;


/// Trait describing supervised models.
///
/// Labels are passed as a column `Array` of encoded class numbers.
/// Two-class models output probabilities of the positive class from
/// `decision_function`; multiclass models override `predict` to return
/// class numbers directly.
pub trait SupervisedModel<T> {
    fn fit(&mut self, X: T, y: &Array) -> Result<(), &'static str>;
    fn decision_function(&self, X: T) -> Result<Array, &'static str>;
    fn predict(&self, x: T) -> Result<Array, &'static str> {

        let decision_func = self.decision_function(x)?;

        Ok(Array::from(decision_func.data()
            .iter()
            .map(|v| {
                match v.partial_cmp(&0.5) {
                    Some(Ordering::Greater) => 1.0,
                    _ => 0.0,
                }
            })
            .collect::<Vec<f32>>()))
    }
}
