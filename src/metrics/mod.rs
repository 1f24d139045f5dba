//! Accuracy metrics.

use crate::array::prelude::*;


/// Measure classifier accuracy: the fraction of exact label matches.
///
/// An empty input scores zero.
///
/// # Panics
/// Will panic if inputs are of unequal length.
pub fn accuracy_score(y_true: &Array, y_hat: &Array) -> f32 {

    assert!(y_true.rows() == y_hat.rows());

    if y_true.rows() == 0 {
        return 0.0;
    }

    let matches = y_true.data()
        .iter()
        .zip(y_hat.data().iter())
        .filter(|&(yt, yh)| yt == yh)
        .count();

    matches as f32 / y_true.rows() as f32
}
