//! Feature selection: keep a subset of the columns of a feature matrix.
//!
//! Every selector is fit on a (training) matrix and its labels, after
//! which `get_support` lists the surviving column indices in ascending
//! order and `transform` keeps exactly those columns of any matrix with
//! the same width. Zero surviving columns is a valid outcome; callers
//! decide how to treat it.
//!
//! # Examples
//!
//! ```
//! use graphofdocs::prelude::*;
//! use graphofdocs::feature_selection::{FeatureSelector, SelectKBest};
//!
//! let X = SparseRowArray::from(&Array::from(&vec![vec![3.0, 1.0, 0.0],
//!                                                 vec![0.0, 1.0, 2.0],
//!                                                 vec![4.0, 1.0, 0.0]]));
//! let y = Array::from(vec![0.0, 1.0, 0.0]);
//!
//! let mut selector = SelectKBest::new(2);
//! selector.fit(&X, &y).unwrap();
//!
//! assert_eq!(selector.get_support(), &[0, 2]);
//! assert!(selector.transform(&X).cols() == 2);
//! ```

pub mod from_model;
pub mod kbest;
pub mod variance;

pub use self::from_model::{FeatureImportance, SelectFromModel, Threshold};
pub use self::kbest::{chi2, SelectKBest};
pub use self::variance::VarianceThreshold;

use crate::prelude::*;


/// Trait describing column selectors.
pub trait FeatureSelector {
    /// Learn which columns to keep.
    fn fit(&mut self, X: &SparseRowArray, y: &Array) -> Result<(), &'static str>;

    /// Indices of the kept columns, ascending.
    fn get_support(&self) -> &[usize];

    fn transform(&self, X: &SparseRowArray) -> SparseRowArray {
        X.get_columns(&self.get_support().to_vec())
    }

    fn fit_transform(&mut self, X: &SparseRowArray, y: &Array) -> Result<SparseRowArray, &'static str> {
        self.fit(X, y)?;
        Ok(self.transform(X))
    }
}
