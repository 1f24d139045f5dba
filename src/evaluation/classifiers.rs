//! The classifier roster run by every evaluator.
//!
//! A `ClassifierSpec` is plain configuration; `build` produces a fresh,
//! unfitted model for a given feature width, so no fitted state ever
//! leaks from one evaluator into the next.

use serde::{Deserialize, Serialize};

use crate::linear_models::sgdclassifier::{self, Loss};
use crate::naive_bayes;
use crate::neighbors::{self, Weights};
use crate::prelude::*;


/// A boxed model that can be fit on and predict sparse feature matrices.
pub type Classifier = Box<dyn for<'a> SupervisedModel<&'a SparseRowArray>>;


#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierSpec {
    NaiveBayes {
        alpha: f32,
    },
    LogisticRegression {
        epochs: usize,
        learning_rate: f32,
        l2_penalty: f32,
    },
    KNearest {
        k: usize,
        weights: Weights,
    },
    LinearSvm {
        epochs: usize,
        learning_rate: f32,
        l2_penalty: f32,
    },
}


impl ClassifierSpec {
    pub fn naive_bayes() -> ClassifierSpec {
        ClassifierSpec::NaiveBayes { alpha: 1.0 }
    }

    pub fn logistic_regression() -> ClassifierSpec {
        ClassifierSpec::LogisticRegression {
            epochs: 10,
            learning_rate: 0.1,
            l2_penalty: 1.0e-4,
        }
    }

    pub fn k_nearest(k: usize) -> ClassifierSpec {
        ClassifierSpec::KNearest {
            k,
            weights: Weights::Distance,
        }
    }

    pub fn linear_svm() -> ClassifierSpec {
        ClassifierSpec::LinearSvm {
            epochs: 10,
            learning_rate: 0.1,
            l2_penalty: 1.0e-4,
        }
    }

    /// Naive Bayes, logistic regression, 5-, 2- and 1-NN, linear SVM.
    pub fn default_roster() -> Vec<ClassifierSpec> {
        vec![ClassifierSpec::naive_bayes(),
             ClassifierSpec::logistic_regression(),
             ClassifierSpec::k_nearest(5),
             ClassifierSpec::k_nearest(2),
             ClassifierSpec::k_nearest(1),
             ClassifierSpec::linear_svm()]
    }

    pub fn name(&self) -> String {
        match self {
            ClassifierSpec::NaiveBayes { .. } => "Naive Bayes".to_string(),
            ClassifierSpec::LogisticRegression { .. } => "Logistic Regression".to_string(),
            ClassifierSpec::KNearest { k, .. } => format!("{}-NN", k),
            ClassifierSpec::LinearSvm { .. } => "Linear SVM".to_string(),
        }
    }

    /// A fresh model over `dim` features.
    pub fn build(&self, dim: usize) -> Classifier {
        match *self {
            ClassifierSpec::NaiveBayes { alpha } => {
                Box::new(naive_bayes::Hyperparameters::new(dim).alpha(alpha).build())
            }
            ClassifierSpec::LogisticRegression { epochs, learning_rate, l2_penalty } => {
                Box::new(sgdclassifier::Hyperparameters::new(dim)
                    .loss(Loss::Logistic)
                    .epochs(epochs)
                    .learning_rate(learning_rate)
                    .l2_penalty(l2_penalty)
                    .one_vs_rest())
            }
            ClassifierSpec::KNearest { k, weights } => {
                Box::new(neighbors::Hyperparameters::new(dim).k(k).weights(weights).build())
            }
            ClassifierSpec::LinearSvm { epochs, learning_rate, l2_penalty } => {
                Box::new(sgdclassifier::Hyperparameters::new(dim)
                    .loss(Loss::Hinge)
                    .epochs(epochs)
                    .learning_rate(learning_rate)
                    .l2_penalty(l2_penalty)
                    .one_vs_rest())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_names() {
        let names = ClassifierSpec::default_roster()
            .iter()
            .map(|spec| spec.name())
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["Naive Bayes", "Logistic Regression", "5-NN", "2-NN", "1-NN", "Linear SVM"]);
    }

    #[test]
    fn every_spec_builds_a_working_model() {
        let X = SparseRowArray::from(&Array::from(&vec![vec![3.0, 0.0],
                                                        vec![0.0, 3.0],
                                                        vec![2.0, 0.0],
                                                        vec![0.0, 2.0]]));
        let y = Array::from(vec![0.0, 1.0, 0.0, 1.0]);

        for spec in ClassifierSpec::default_roster() {
            let mut model = spec.build(2);

            model.fit(&X, &y).unwrap();
            let prediction = model.predict(&X).unwrap();

            assert_eq!(prediction.rows(), 4);
            assert!(prediction.data().iter().all(|&p| p == 0.0 || p == 1.0));
        }
    }

    #[test]
    fn specs_deserialize_from_tagged_config() {
        let spec: ClassifierSpec = serde_json::from_str(r#"{"type": "k_nearest", "k": 3, "weights": "uniform"}"#).unwrap();

        assert_eq!(spec, ClassifierSpec::KNearest { k: 3, weights: Weights::Uniform });
        assert_eq!(spec.name(), "3-NN");
    }
}
