//! k-nearest-neighbours classification.
//!
//! Fitting stores the training rows; prediction ranks training rows by
//! Euclidean distance to each query row and lets the `k` closest vote.
//! Under `Weights::Distance` a neighbour's vote counts `1 / distance`, and
//! neighbours at distance zero (exact duplicates) outvote everything else.
//!
//! Neighbours at equal distance are taken in training order, and tied votes
//! go to the lowest class number. When `k` exceeds the number of training
//! rows all of them vote.
//!
//! # Examples
//!
//! ```
//! use graphofdocs::prelude::*;
//! use graphofdocs::neighbors::{Hyperparameters, Weights};
//!
//! let X = SparseRowArray::from(&Array::from(&vec![vec![0.0, 1.0],
//!                                                 vec![0.0, 2.0],
//!                                                 vec![5.0, 0.0]]));
//! let y = Array::from(vec![1.0, 1.0, 0.0]);
//!
//! let mut model = Hyperparameters::new(X.cols())
//!     .k(2)
//!     .weights(Weights::Distance)
//!     .build();
//!
//! model.fit(&X, &y).unwrap();
//!
//! let query = SparseRowArray::from(&Array::from(&vec![vec![0.0, 1.5]]));
//! assert!(model.predict(&query).unwrap().data() == &vec![1.0]);
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::prelude::*;


/// How the votes of the nearest neighbours are weighted.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Weights {
    Uniform,
    Distance,
}


/// Hyperparameters for a `KNeighborsClassifier`.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
pub struct Hyperparameters {
    dim: usize,
    k: usize,
    weights: Weights,
}


impl Hyperparameters {
    /// Creates new Hyperparameters: five neighbours with uniform weights.
    pub fn new(dim: usize) -> Hyperparameters {
        Hyperparameters {
            dim,
            k: 5,
            weights: Weights::Uniform,
        }
    }

    /// Set the number of neighbours consulted.
    pub fn k(&mut self, k: usize) -> &mut Hyperparameters {
        self.k = k;
        self
    }

    pub fn weights(&mut self, weights: Weights) -> &mut Hyperparameters {
        self.weights = weights;
        self
    }

    pub fn build(&self) -> KNeighborsClassifier {
        KNeighborsClassifier {
            dim: self.dim,
            k: self.k,
            weights: self.weights,
            class_labels: Vec::new(),
            train: None,
        }
    }
}


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
struct TrainingSet {
    X: SparseRowArray,
    y: Vec<f32>,
    squared_norms: Vec<f32>,
}


/// A k-nearest-neighbours classifier.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
pub struct KNeighborsClassifier {
    dim: usize,
    k: usize,
    weights: Weights,
    class_labels: Vec<f32>,
    train: Option<TrainingSet>,
}


fn squared_norm(row: &SparseArrayView) -> f32 {
    row.data().iter().map(|v| v * v).sum()
}


fn sparse_dot(a: &SparseArrayView, b: &SparseArrayView) -> f32 {

    let (a_idx, a_val) = (a.indices(), a.data());
    let (b_idx, b_val) = (b.indices(), b.data());

    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;

    while i < a_idx.len() && j < b_idx.len() {
        match a_idx[i].cmp(&b_idx[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                dot += a_val[i] * b_val[j];
                i += 1;
                j += 1;
            }
        }
    }

    dot
}


impl KNeighborsClassifier {

    fn vote(&self, train: &TrainingSet, query: &SparseArrayView) -> f32 {

        let query_norm = squared_norm(query);

        let mut distances = train.X
            .iter_rows()
            .zip(train.squared_norms.iter())
            .enumerate()
            .map(|(idx, (row, &norm))| {
                let squared = (query_norm + norm - 2.0 * sparse_dot(query, &row)).max(0.0);
                (idx, squared.sqrt())
            })
            .collect::<Vec<_>>();

        // Stable, so equidistant neighbours keep training order.
        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        distances.truncate(self.k.max(1));

        let has_exact_match = distances.iter().any(|&(_, distance)| distance == 0.0);

        let mut votes = vec![0.0f32; self.class_labels.len()];

        for &(idx, distance) in &distances {
            let weight = match self.weights {
                Weights::Uniform => 1.0,
                Weights::Distance if has_exact_match => if distance == 0.0 { 1.0 } else { 0.0 },
                Weights::Distance => 1.0 / distance,
            };

            if let Some(class_idx) = self.class_labels.iter().position(|&c| c == train.y[idx]) {
                votes[class_idx] += weight;
            }
        }

        let mut best = 0;
        for (class_idx, &value) in votes.iter().enumerate() {
            if value > votes[best] {
                best = class_idx;
            }
        }

        self.class_labels[best]
    }
}


impl<'a> SupervisedModel<&'a SparseRowArray> for KNeighborsClassifier {

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

        let squared_norms = X.iter_rows().map(|row| squared_norm(&row)).collect();

        self.class_labels = class_labels;
        self.train = Some(TrainingSet {
            X: X.clone(),
            y: y.data().clone(),
            squared_norms,
        });

        Ok(())
    }

    /// One-hot encoding of the predicted class, one column per class.
    fn decision_function(&self, X: &'a SparseRowArray) -> Result<Array, &'static str> {

        let predictions = self.predict(X)?;
        let mut out = Array::zeros(X.rows(), self.class_labels.len());

        for (row_idx, &label) in predictions.data().iter().enumerate() {
            if let Some(class_idx) = self.class_labels.iter().position(|&c| c == label) {
                out.set(row_idx, class_idx, 1.0);
            }
        }

        Ok(out)
    }

    fn predict(&self, X: &'a SparseRowArray) -> Result<Array, &'static str> {

        let train = self.train.as_ref().ok_or("Model must be fit before predicting")?;

        if X.cols() != self.dim {
            return Err("Feature matrix width does not match model dimension");
        }

        let predictions = X.iter_rows()
            .map(|row| self.vote(train, &row))
            .collect::<Vec<_>>();

        Ok(Array::from(predictions))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn training_data() -> (SparseRowArray, Array) {
        let X = SparseRowArray::from(&Array::from(&vec![vec![0.0, 1.0],
                                                        vec![0.0, 1.2],
                                                        vec![4.0, 0.0],
                                                        vec![4.2, 0.0],
                                                        vec![4.4, 0.0]]));
        let y = Array::from(vec![1.0, 1.0, 0.0, 0.0, 0.0]);

        (X, y)
    }

    #[test]
    fn sparse_dot_matches_dense() {
        let X = SparseRowArray::from(&Array::from(&vec![vec![1.0, 0.0, 2.0, 3.0],
                                                        vec![0.0, 5.0, 1.0, 2.0]]));

        assert!(close(sparse_dot(&X.view_row(0), &X.view_row(1)), 8.0));
        assert!(close(squared_norm(&X.view_row(0)), 14.0));
    }

    #[test]
    fn one_neighbour_memorises_training_set() {
        let (X, y) = training_data();

        let mut model = Hyperparameters::new(2).k(1).weights(Weights::Distance).build();
        model.fit(&X, &y).unwrap();

        assert_eq!(model.predict(&X).unwrap().data(), y.data());
    }

    #[test]
    fn uniform_majority_with_large_k() {
        let (X, y) = training_data();

        // k larger than the training set: all five rows vote, class 0 wins 3 to 2.
        let mut model = Hyperparameters::new(2).k(10).build();
        model.fit(&X, &y).unwrap();

        let query = SparseRowArray::from(&Array::from(&vec![vec![0.0, 1.1]]));

        assert_eq!(model.predict(&query).unwrap().data(), &vec![0.0]);
    }

    #[test]
    fn distance_weights_favour_close_neighbours() {
        let (X, y) = training_data();

        let mut model = Hyperparameters::new(2).k(10).weights(Weights::Distance).build();
        model.fit(&X, &y).unwrap();

        let query = SparseRowArray::from(&Array::from(&vec![vec![0.0, 1.1]]));

        assert_eq!(model.predict(&query).unwrap().data(), &vec![1.0]);
    }

    #[test]
    fn decision_function_is_one_hot() {
        let (X, y) = training_data();

        let mut model = Hyperparameters::new(2).k(1).build();
        model.fit(&X, &y).unwrap();

        let decision = model.decision_function(&X).unwrap();

        assert!(decision.cols() == 2);
        assert!(decision.get(0, 1) == 1.0 && decision.get(0, 0) == 0.0);
    }
}
