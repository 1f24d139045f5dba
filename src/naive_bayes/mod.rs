//! Multinomial naive Bayes for count features.
//!
//! Class-conditional term probabilities are estimated from per-class feature
//! totals with additive (Lidstone) smoothing. The model is natively multiclass:
//! `decision_function` returns one column of joint log-likelihoods per class,
//! and `predict` returns the class with the highest value (the lowest class
//! number on ties).
//!
//! # Examples
//!
//! ```
//! use graphofdocs::prelude::*;
//! use graphofdocs::naive_bayes::Hyperparameters;
//!
//! let X = SparseRowArray::from(&Array::from(&vec![vec![3.0, 0.0],
//!                                                 vec![0.0, 2.0]]));
//! let y = Array::from(vec![0.0, 1.0]);
//!
//! let mut model = Hyperparameters::new(X.cols()).alpha(1.0).build();
//!
//! model.fit(&X, &y).unwrap();
//!
//! assert!(model.predict(&X).unwrap().data() == &vec![0.0, 1.0]);
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::prelude::*;


/// Hyperparameters for a `MultinomialNB` model.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
pub struct Hyperparameters {
    dim: usize,
    alpha: f32,
}


impl Hyperparameters {
    /// Creates new Hyperparameters with Laplace smoothing (`alpha = 1`).
    pub fn new(dim: usize) -> Hyperparameters {
        Hyperparameters { dim, alpha: 1.0 }
    }

    /// Set the additive smoothing parameter.
    pub fn alpha(&mut self, alpha: f32) -> &mut Hyperparameters {
        self.alpha = alpha;
        self
    }

    pub fn build(&self) -> MultinomialNB {
        MultinomialNB {
            dim: self.dim,
            alpha: self.alpha,
            class_labels: Vec::new(),
            class_log_prior: Vec::new(),
            feature_log_prob: Vec::new(),
        }
    }
}


/// A multinomial naive Bayes classifier.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
pub struct MultinomialNB {
    dim: usize,
    alpha: f32,
    class_labels: Vec<f32>,
    class_log_prior: Vec<f32>,
    feature_log_prob: Vec<Vec<f32>>,
}


impl MultinomialNB {
    /// Class numbers seen during fitting, in ascending order.
    pub fn class_labels(&self) -> &[f32] {
        &self.class_labels
    }
}


impl<'a> SupervisedModel<&'a SparseRowArray> for MultinomialNB {

    fn fit(&mut self, X: &'a SparseRowArray, y: &Array) -> Result<(), &'static str> {

        if X.cols() != self.dim {
            return Err("Feature matrix width does not match model dimension");
        }
        if X.rows() != y.rows() || y.cols() != 1 {
            return Err("Target must be a column vector with one entry per row");
        }
        if X.rows() == 0 {
            return Err("Cannot fit on an empty training set");
        }

        let mut class_labels = y.data().clone();
        class_labels.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        class_labels.dedup();

        let mut class_counts = vec![0.0f32; class_labels.len()];
        let mut feature_counts = vec![vec![0.0f32; self.dim]; class_labels.len()];

        for (row, &label) in X.iter_rows().zip(y.data().iter()) {
            let class_idx = class_labels
                .iter()
                .position(|&c| c == label)
                .ok_or("Unknown class label")?;

            class_counts[class_idx] += 1.0;

            for (col, value) in row.iter_nonzero() {
                feature_counts[class_idx][col] += value;
            }
        }

        let total = X.rows() as f32;
        let smoothing = self.alpha * self.dim as f32;

        self.class_log_prior = class_counts.iter().map(|&count| (count / total).ln()).collect();
        self.feature_log_prob = feature_counts
            .iter()
            .map(|counts| {
                let class_total = counts.iter().sum::<f32>() + smoothing;
                counts
                    .iter()
                    .map(|&count| ((count + self.alpha) / class_total).ln())
                    .collect()
            })
            .collect();
        self.class_labels = class_labels;

        Ok(())
    }

    fn decision_function(&self, X: &'a SparseRowArray) -> Result<Array, &'static str> {

        if self.class_labels.is_empty() {
            return Err("Model must be fit before predicting");
        }
        if X.cols() != self.dim {
            return Err("Feature matrix width does not match model dimension");
        }

        let mut out = Array::zeros(X.rows(), self.class_labels.len());

        for (row_idx, row) in X.iter_rows().enumerate() {
            for (class_idx, (prior, log_probs)) in self.class_log_prior
                .iter()
                .zip(self.feature_log_prob.iter())
                .enumerate() {

                let likelihood = row.iter_nonzero()
                    .map(|(col, value)| value * log_probs[col])
                    .sum::<f32>();

                out.set(row_idx, class_idx, prior + likelihood);
            }
        }

        Ok(out)
    }

    fn predict(&self, X: &'a SparseRowArray) -> Result<Array, &'static str> {

        let decision = self.decision_function(X)?;

        let predictions = decision.iter_rows()
            .map(|row| {
                let mut best = (0, f32::NEG_INFINITY);
                for (class_idx, value) in row.iter().enumerate() {
                    if value > best.1 {
                        best = (class_idx, value);
                    }
                }
                self.class_labels[best.0]
            })
            .collect::<Vec<_>>();

        Ok(Array::from(predictions))
    }
}
