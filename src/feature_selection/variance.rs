//! Drop columns whose variance falls below a threshold.
//!
//! Variance is the population variance of each column over the rows the
//! selector is fit on. Columns with variance greater than or equal to the
//! threshold survive, so a threshold of zero keeps every column.

use serde::{Deserialize, Serialize};

use crate::feature_selection::FeatureSelector;
use crate::prelude::*;


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
pub struct VarianceThreshold {
    threshold: f32,
    variances: Vec<f32>,
    support: Vec<usize>,
}


impl VarianceThreshold {
    pub fn new(threshold: f32) -> VarianceThreshold {
        VarianceThreshold {
            threshold,
            variances: Vec::new(),
            support: Vec::new(),
        }
    }

    /// Per-column variances computed by the last `fit`.
    pub fn variances(&self) -> &[f32] {
        &self.variances
    }
}


fn column_variances(X: &SparseRowArray) -> Vec<f32> {

    let n = X.rows() as f64;
    let columns = SparseColumnArray::from(X);

    columns.iter_columns()
        .map(|column| {
            if n == 0.0 {
                return 0.0;
            }

            let (sum, sum_sq) = column.iter_nonzero()
                .fold((0.0f64, 0.0f64), |(sum, sum_sq), (_, value)| {
                    let value = value as f64;
                    (sum + value, sum_sq + value * value)
                });

            let mean = sum / n;
            (sum_sq / n - mean * mean).max(0.0) as f32
        })
        .collect()
}


impl FeatureSelector for VarianceThreshold {

    fn fit(&mut self, X: &SparseRowArray, _: &Array) -> Result<(), &'static str> {

        if X.rows() == 0 {
            return Err("Cannot compute variances of an empty matrix");
        }

        self.variances = column_variances(X);
        self.support = self.variances
            .iter()
            .enumerate()
            .filter(|&(_, &variance)| variance >= self.threshold)
            .map(|(idx, _)| idx)
            .collect();

        Ok(())
    }

    fn get_support(&self) -> &[usize] {
        &self.support
    }
}
