//! The Benchmark Loop.
//!
//! Each classifier is built fresh, fit on exactly the training rows and
//! scored on exactly the test rows. Nothing is printed here; callers log
//! or tabulate the returned scores.

use tracing::debug;

use crate::error::{Error, Result};
use crate::evaluation::classifiers::ClassifierSpec;
use crate::metrics::accuracy_score;
use crate::prelude::*;


/// Accuracy of one classifier on the test rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Score {
    pub classifier: String,
    pub accuracy: f32,
}


/// Fit and score every classifier, in order, on one fixed split.
pub fn run(X_train: &SparseRowArray,
           y_train: &Array,
           X_test: &SparseRowArray,
           y_test: &Array,
           classifiers: &[ClassifierSpec])
           -> Result<Vec<Score>> {

    if X_train.cols() != X_test.cols() {
        return Err(Error::Model("Train and test matrices have different widths"));
    }

    classifiers
        .iter()
        .map(|spec| {
            let mut model = spec.build(X_train.cols());

            model.fit(X_train, y_train).map_err(Error::Model)?;
            let y_hat = model.predict(X_test).map_err(Error::Model)?;

            let accuracy = accuracy_score(y_test, &y_hat);

            debug!(classifier = %spec.name(), accuracy, "benchmarked classifier");

            Ok(Score {
                classifier: spec.name(),
                accuracy,
            })
        })
        .collect()
}
