//! Keep the `k` columns with the highest chi-squared statistic.
//!
//! Columns are ranked by score with a stable sort, so equal scores keep
//! their original column order. When `k` is at least the number of
//! columns every column is kept.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::feature_selection::FeatureSelector;
use crate::multiclass::OneVsRest;
use crate::prelude::*;


/// Chi-squared statistic of each (non-negative) feature against the labels.
///
/// Observed values are the per-class feature totals; expected values are
/// the feature total scaled by the class frequency. Terms with a zero
/// expected value contribute nothing.
pub fn chi2(X: &SparseRowArray, y: &Array) -> Result<Vec<f32>, &'static str> {

    if X.rows() != y.rows() {
        return Err("Feature matrix and labels have different row counts");
    }
    if X.rows() == 0 {
        return Err("Cannot score features of an empty matrix");
    }

    let n = X.rows() as f64;
    let mut feature_totals = vec![0.0f64; X.cols()];

    for row in X.iter_rows() {
        for (col, value) in row.iter_nonzero() {
            feature_totals[col] += value as f64;
        }
    }

    let mut scores = vec![0.0f64; X.cols()];

    for (_, membership) in OneVsRest::split(y) {

        let class_frequency = membership.sum() as f64 / n;
        let mut observed = vec![0.0f64; X.cols()];

        for (row, &member) in X.iter_rows().zip(membership.data().iter()) {
            if member == 1.0 {
                for (col, value) in row.iter_nonzero() {
                    observed[col] += value as f64;
                }
            }
        }

        for (col, score) in scores.iter_mut().enumerate() {
            let expected = class_frequency * feature_totals[col];
            if expected > 0.0 {
                *score += (observed[col] - expected).powi(2) / expected;
            }
        }
    }

    Ok(scores.into_iter().map(|score| score as f32).collect())
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
pub struct SelectKBest {
    k: usize,
    scores: Vec<f32>,
    support: Vec<usize>,
}


impl SelectKBest {
    pub fn new(k: usize) -> SelectKBest {
        SelectKBest {
            k,
            scores: Vec::new(),
            support: Vec::new(),
        }
    }

    /// Chi-squared scores computed by the last `fit`.
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }
}


impl FeatureSelector for SelectKBest {

    fn fit(&mut self, X: &SparseRowArray, y: &Array) -> Result<(), &'static str> {

        self.scores = chi2(X, y)?;

        let mut ranked = (0..self.scores.len()).collect::<Vec<_>>();
        ranked.sort_by(|&a, &b| {
            self.scores[b].partial_cmp(&self.scores[a]).unwrap_or(Ordering::Equal)
        });
        ranked.truncate(self.k);
        ranked.sort();

        self.support = ranked;

        Ok(())
    }

    fn get_support(&self) -> &[usize] {
        &self.support
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> (SparseRowArray, Array) {
        let X = SparseRowArray::from(&Array::from(&vec![vec![2.0, 1.0, 0.0, 1.0],
                                                        vec![0.0, 1.0, 3.0, 1.0],
                                                        vec![4.0, 1.0, 0.0, 1.0],
                                                        vec![0.0, 1.0, 1.0, 1.0]]));
        let y = Array::from(vec![0.0, 1.0, 0.0, 1.0]);

        (X, y)
    }

    #[test]
    fn chi2_matches_hand_computation() {
        let (X, y) = data();

        let scores = chi2(&X, &y).unwrap();

        // Column 0: total 6, all in class 0; expected 3 per class.
        assert!(close(scores[0], 6.0));
        // Column 2: total 4, all in class 1; expected 2 per class.
        assert!(close(scores[2], 4.0));
        // Uninformative columns.
        assert!(close(scores[1], 0.0));
        assert!(close(scores[3], 0.0));
    }

    #[test]
    fn keeps_exactly_k() {
        let (X, y) = data();

        let mut selector = SelectKBest::new(2);

        assert!(selector.fit_transform(&X, &y).unwrap().cols() == 2);
        assert_eq!(selector.get_support(), &[0, 2]);
    }

    #[test]
    fn ties_keep_column_order() {
        let (X, y) = data();

        let mut selector = SelectKBest::new(3);
        selector.fit(&X, &y).unwrap();

        assert_eq!(selector.get_support(), &[0, 1, 2]);
    }

    #[test]
    fn large_k_keeps_everything() {
        let (X, y) = data();

        let mut selector = SelectKBest::new(100);

        assert!(selector.fit_transform(&X, &y).unwrap().cols() == 4);
    }
}
