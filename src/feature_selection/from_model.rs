//! Meta-model feature selection.
//!
//! An auxiliary model is fit on the data and its per-feature importances
//! are compared against a threshold; columns whose importance is greater
//! than or equal to the threshold survive. For one-vs-rest linear models
//! the importance of a feature is the L1 norm of its coefficients across
//! the per-class models.
//!
//! # Examples
//!
//! ```
//! use graphofdocs::prelude::*;
//! use graphofdocs::feature_selection::{FeatureSelector, SelectFromModel, Threshold};
//! use graphofdocs::linear_models::sgdclassifier::{Hyperparameters, Loss};
//!
//! let X = SparseRowArray::from(&Array::from(&vec![vec![1.0, 0.0, 1.0],
//!                                                 vec![0.0, 1.0, 1.0],
//!                                                 vec![2.0, 0.0, 1.0],
//!                                                 vec![0.0, 2.0, 1.0]]));
//! let y = Array::from(vec![0.0, 1.0, 0.0, 1.0]);
//!
//! let model = Hyperparameters::new(X.cols())
//!     .loss(Loss::Hinge)
//!     .epochs(5)
//!     .one_vs_rest();
//!
//! let mut selector = SelectFromModel::new(model, Threshold::Mean);
//! let X_selected = selector.fit_transform(&X, &y).unwrap();
//!
//! assert!(X_selected.cols() <= X.cols());
//! ```

use serde::{Deserialize, Serialize};

use crate::feature_selection::FeatureSelector;
use crate::linear_models::sgdclassifier::SGDClassifier;
use crate::multiclass::OneVsRestWrapper;
use crate::prelude::*;


/// Models that can report how much each input feature matters.
pub trait FeatureImportance {
    fn feature_importances(&self) -> Result<Vec<f32>, &'static str>;
}


impl FeatureImportance for SGDClassifier {
    fn feature_importances(&self) -> Result<Vec<f32>, &'static str> {
        Ok(self.get_coefficients().data().iter().map(|c| c.abs()).collect())
    }
}


impl<T: FeatureImportance + Clone> FeatureImportance for OneVsRestWrapper<T> {
    fn feature_importances(&self) -> Result<Vec<f32>, &'static str> {

        let mut importances: Option<Vec<f32>> = None;

        for model in self.models() {
            let model_importances = model.feature_importances()?;

            importances = Some(match importances {
                None => model_importances,
                Some(mut total) => {
                    for (acc, value) in total.iter_mut().zip(model_importances.iter()) {
                        *acc += value;
                    }
                    total
                }
            });
        }

        importances.ok_or("Model must be fit before reading importances")
    }
}


/// Cut-off applied to feature importances.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Threshold {
    /// The mean importance over all features.
    Mean,
    Value(f32),
}


pub struct SelectFromModel<M> {
    model: M,
    threshold: Threshold,
    importances: Vec<f32>,
    support: Vec<usize>,
}


impl<M> SelectFromModel<M>
where
    M: for<'a> SupervisedModel<&'a SparseRowArray> + FeatureImportance,
{
    pub fn new(model: M, threshold: Threshold) -> SelectFromModel<M> {
        SelectFromModel {
            model,
            threshold,
            importances: Vec::new(),
            support: Vec::new(),
        }
    }

    /// Importances reported by the fitted model.
    pub fn importances(&self) -> &[f32] {
        &self.importances
    }

    /// The numeric cut-off resolved during `fit`.
    pub fn threshold_value(&self) -> f32 {
        match self.threshold {
            Threshold::Value(value) => value,
            Threshold::Mean if self.importances.is_empty() => 0.0,
            Threshold::Mean => {
                self.importances.iter().sum::<f32>() / self.importances.len() as f32
            }
        }
    }
}


impl<M> FeatureSelector for SelectFromModel<M>
where
    M: for<'a> SupervisedModel<&'a SparseRowArray> + FeatureImportance,
{
    fn fit(&mut self, X: &SparseRowArray, y: &Array) -> Result<(), &'static str> {

        self.model.fit(X, y)?;
        self.importances = self.model.feature_importances()?;

        let threshold = self.threshold_value();

        self.support = self.importances
            .iter()
            .enumerate()
            .filter(|&(_, &importance)| importance >= threshold)
            .map(|(idx, _)| idx)
            .collect();

        Ok(())
    }

    fn get_support(&self) -> &[usize] {
        &self.support
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::linear_models::sgdclassifier::{Hyperparameters, Loss};

    fn data() -> (SparseRowArray, Array) {
        let X = SparseRowArray::from(&Array::from(&vec![vec![3.0, 0.0, 0.0],
                                                        vec![0.0, 3.0, 0.0],
                                                        vec![2.0, 0.0, 0.0],
                                                        vec![0.0, 2.0, 0.0],
                                                        vec![0.0, 0.0, 0.0]]));
        let y = Array::from(vec![0.0, 1.0, 0.0, 1.0, 2.0]);

        (X, y)
    }

    #[test]
    fn importance_sums_class_coefficients() {
        let (X, y) = data();

        let mut model = Hyperparameters::new(3)
            .loss(Loss::Hinge)
            .learning_rate(0.5)
            .epochs(5)
            .one_vs_rest();
        model.fit(&X, &y).unwrap();

        let importances = model.feature_importances().unwrap();
        let expected = (0..3)
            .map(|idx| {
                model.models()
                    .iter()
                    .map(|m| m.get_coefficients().data()[idx].abs())
                    .sum::<f32>()
            })
            .collect::<Vec<_>>();

        assert!(allclose(&Array::from(importances), &Array::from(expected)));
    }

    #[test]
    fn unused_feature_is_dropped() {
        let (X, y) = data();

        let model = Hyperparameters::new(3)
            .loss(Loss::Hinge)
            .learning_rate(0.5)
            .epochs(5)
            .one_vs_rest();

        let mut selector = SelectFromModel::new(model, Threshold::Mean);
        selector.fit(&X, &y).unwrap();

        // Column 2 is never nonzero, so its coefficients never move.
        assert!(selector.importances()[2] == 0.0);
        assert!(!selector.get_support().contains(&2));
        assert!(!selector.get_support().is_empty());
    }

    #[test]
    fn explicit_threshold() {
        let (X, y) = data();

        let model = Hyperparameters::new(3).loss(Loss::Hinge).one_vs_rest();

        let mut selector = SelectFromModel::new(model, Threshold::Value(1.0e6));

        assert!(selector.fit_transform(&X, &y).unwrap().cols() == 0);
    }

    #[test]
    fn unfitted_wrapper_has_no_importances() {
        let model = Hyperparameters::new(3).one_vs_rest();

        assert!(model.feature_importances().is_err());
    }
}
