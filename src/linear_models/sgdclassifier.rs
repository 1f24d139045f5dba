//! A two-class linear classifier implemented using stochastic gradient descent.
//!
//! This model implements a two-class linear classifier, using stochastic
//! gradient descent with an adaptive per-parameter learning rate (Adagrad). The model
//! can be regularized using L2 and L1 regularization and is fit on sparse data.
//!
//! Two losses are supported:
//!
//! - `Loss::Logistic` gives logistic regression; `decision_function` returns the
//!   probability of the positive class,
//! - `Loss::Hinge` gives a linear support vector machine; `decision_function`
//!   returns the signed margin.
//!
//! Every call to `fit` runs the configured number of epochs over the data, and
//! repeated calls continue training from the current coefficients.
//!
//! # Examples
//!
//! ```
//! use graphofdocs::prelude::*;
//! use graphofdocs::linear_models::sgdclassifier::{Hyperparameters, Loss};
//!
//! let X = SparseRowArray::from(&Array::from(&vec![vec![1.0, 0.0],
//!                                                 vec![0.0, 1.0],
//!                                                 vec![2.0, 0.0]]));
//! let y = Array::from(vec![0.0, 1.0, 0.0]);
//!
//! let mut model = Hyperparameters::new(X.cols())
//!                                 .learning_rate(0.5)
//!                                 .loss(Loss::Hinge)
//!                                 .epochs(10)
//!                                 .one_vs_rest();
//!
//! model.fit(&X, &y).unwrap();
//!
//! let prediction = model.predict(&X).unwrap();
//! assert!(prediction.rows() == 3);
//! ```

use std::iter::Iterator;

use serde::{Deserialize, Serialize};

use crate::multiclass::OneVsRestWrapper;
use crate::prelude::*;


/// Loss function minimised by the classifier.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loss {
    Logistic,
    Hinge,
}


/// Hyperparameters for a SGDClassifier model.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
pub struct Hyperparameters {
    dim: usize,

    loss: Loss,
    epochs: usize,
    learning_rate: f32,
    l2_penalty: f32,
    l1_penalty: f32,
}


impl Hyperparameters {
    /// Creates new Hyperparameters for a model over `dim` features.
    ///
    /// Defaults to logistic loss, one epoch, learning rate 0.05 and
    /// no regularization.
    pub fn new(dim: usize) -> Hyperparameters {
        Hyperparameters {
            dim,
            loss: Loss::Logistic,
            epochs: 1,
            learning_rate: 0.05,
            l2_penalty: 0.0,
            l1_penalty: 0.0,
        }
    }

    /// Set the loss function.
    pub fn loss(&mut self, loss: Loss) -> &mut Hyperparameters {
        self.loss = loss;
        self
    }

    /// Set the number of passes over the data made by each call to `fit`.
    pub fn epochs(&mut self, epochs: usize) -> &mut Hyperparameters {
        self.epochs = epochs;
        self
    }

    /// Set the initial learning rate.
    ///
    /// During fitting, the learning rate decreases more for parameters which have
    /// have received larger gradient updates. This maintains more stable estimates
    /// for common features while allowing fast learning for rare features.
    pub fn learning_rate(&mut self, learning_rate: f32) -> &mut Hyperparameters {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the L2 penalty.
    pub fn l2_penalty(&mut self, l2_penalty: f32) -> &mut Hyperparameters {
        self.l2_penalty = l2_penalty;
        self
    }

    /// Set the L1 penalty.
    ///
    /// Coefficient sparsity is achieved by truncating at zero whenever
    /// a coefficient update would change its sign.
    pub fn l1_penalty(&mut self, l1_penalty: f32) -> &mut Hyperparameters {
        self.l1_penalty = l1_penalty;
        self
    }

    /// Build a two-class model.
    pub fn build(&self) -> SGDClassifier {
        SGDClassifier {
            dim: self.dim,
            loss: self.loss,
            epochs: self.epochs,
            learning_rate: self.learning_rate,
            l2_penalty: self.l2_penalty,
            l1_penalty: self.l1_penalty,
            coefficients: Array::zeros(self.dim, 1),
            gradsq: Array::ones(self.dim, 1),
            applied_l1: Array::zeros(self.dim, 1),
            applied_l2: Array::ones(self.dim, 1),
            accumulated_l1: 0.0,
            accumulated_l2: 1.0,
        }
    }

    /// Build a one-vs-rest multiclass model.
    pub fn one_vs_rest(&self) -> OneVsRestWrapper<SGDClassifier> {
        OneVsRestWrapper::new(self.build())
    }
}


/// A two-class linear classifier implemented using stochastic gradient descent.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
pub struct SGDClassifier {
    dim: usize,

    loss: Loss,
    epochs: usize,
    learning_rate: f32,
    l2_penalty: f32,
    l1_penalty: f32,

    coefficients: Array,
    gradsq: Array,
    applied_l1: Array,
    applied_l2: Array,
    accumulated_l1: f32,
    accumulated_l2: f32,
}


fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}


/// Derivative of the loss with respect to the raw prediction.
fn loss_gradient(loss: Loss, y: f32, raw_prediction: f32) -> f32 {
    match loss {
        Loss::Logistic => sigmoid(raw_prediction) - y,
        Loss::Hinge => {
            let sign = if y > 0.5 { 1.0 } else { -1.0 };
            if sign * raw_prediction < 1.0 { -sign } else { 0.0 }
        }
    }
}


impl<'a> SupervisedModel<&'a SparseRowArray> for SGDClassifier {

    fn fit(&mut self, X: &'a SparseRowArray, y: &Array) -> Result<(), &'static str> {

        if X.cols() != self.dim {
            return Err("Feature matrix width does not match model dimension");
        }
        if X.rows() != y.rows() || y.cols() != 1 {
            return Err("Target must be a column vector with one entry per row");
        }

        for _ in 0..self.epochs {
            for (row, &true_y) in X.iter_rows().zip(y.data().iter()) {
                let raw = self.compute_prediction(&row);
                let gradient = loss_gradient(self.loss, true_y, raw);
                self.update(&row, gradient);
            }

            for idx in 0..self.dim {
                self.apply_regularization(idx);
            }
        }

        Ok(())
    }

    fn decision_function(&self, X: &'a SparseRowArray) -> Result<Array, &'static str> {

        if X.cols() != self.dim {
            return Err("Feature matrix width does not match model dimension");
        }

        let data = X.iter_rows()
            .map(|row| {
                let raw = self.compute_prediction(&row);
                match self.loss {
                    Loss::Logistic => sigmoid(raw),
                    Loss::Hinge => raw,
                }
            })
            .collect::<Vec<_>>();

        Ok(Array::from(data))
    }

    fn predict(&self, X: &'a SparseRowArray) -> Result<Array, &'static str> {

        let threshold = match self.loss {
            Loss::Logistic => 0.5,
            Loss::Hinge => 0.0,
        };

        let decision = self.decision_function(X)?;

        Ok(Array::from(decision.data()
            .iter()
            .map(|&v| if v > threshold { 1.0 } else { 0.0 })
            .collect::<Vec<f32>>()))
    }
}


impl SGDClassifier {

    /// Returns a reference to the estimated coefficients vector.
    pub fn get_coefficients(&self) -> &Array {
        &self.coefficients
    }

    fn update_at_idx(&mut self, idx: usize, update: f32) {

        let gradsq = self.gradsq.get(idx, 0);

        let local_learning_rate = self.learning_rate / gradsq.sqrt();

        *self.coefficients.get_mut(idx, 0) -= local_learning_rate * update;
        *self.gradsq.get_mut(idx, 0) += update.powi(2);
    }

    fn update<T: NonzeroIterable>(&mut self, x: &T, gradient: f32) {

        if gradient != 0.0 {
            for (idx, value) in x.iter_nonzero() {
                self.update_at_idx(idx, gradient * value);
                self.apply_regularization(idx);
            }
        }

        self.accumulate_regularization();
    }

    fn accumulate_regularization(&mut self) {
        self.accumulated_l1 += self.l1_penalty;
        self.accumulated_l2 *= 1.0 - self.l2_penalty;
    }

    fn apply_regularization(&mut self, coefficient_index: usize) {

        let idx = coefficient_index;
        let local_learning_rate = self.learning_rate / self.gradsq.get(idx, 0).sqrt();

        let coefficient = self.coefficients.get_mut(idx, 0);
        let applied_l2 = self.applied_l2.get_mut(idx, 0);
        let applied_l1 = self.applied_l1.get_mut(idx, 0);

        let l2_update = self.accumulated_l2 / *applied_l2;

        *coefficient *= 1.0 - (1.0 - l2_update) * local_learning_rate;
        *applied_l2 *= l2_update;

        let pre_update_coeff = *coefficient;
        let l1_potential_update = self.accumulated_l1 - *applied_l1;

        if *coefficient > 0.0 {
            *coefficient = (*coefficient - local_learning_rate * l1_potential_update).max(0.0);
        } else {
            *coefficient = (*coefficient + local_learning_rate * l1_potential_update).min(0.0);
        }

        *applied_l1 += (pre_update_coeff - *coefficient).abs();
    }

    fn compute_prediction<T: NonzeroIterable>(&self, row: &T) -> f32 {
        row.iter_nonzero()
            .map(|(idx, value)| self.coefficients.get(idx, 0) * value)
            .sum()
    }
}
