//! Text-classification experiments over graph-of-docs communities.
//!
//! # Introduction
//!
//! A graph database groups documents into communities by the words they
//! share. This crate measures how useful those communities are for
//! classification: it builds several feature representations of a labelled
//! corpus (plain bag-of-words, selected subsets of it, bigrams, and
//! vocabularies or tag lists drawn from the communities themselves), runs a
//! fixed roster of classifiers on each, and compares the accuracies with a
//! baseline that simply predicts the majority label of a document's
//! community.
//!
//! # Features
//!
//! ## Matrix primitives
//!
//! - [dense matrices](array/dense/index.html)
//! - [sparse matrices](array/sparse/index.html)
//!
//! ## Models
//!
//! - [logistic regression and linear SVMs](linear_models/sgdclassifier/index.html) using stochastic gradient descent,
//! - [multinomial naive Bayes](naive_bayes/index.html), and
//! - [k-nearest neighbours](neighbors/index.html).
//!
//! ## Experiment pieces
//!
//! - [community index](community/index.html) built from a [graph store](graph/index.html),
//! - [dataset frame](frame/index.html) with labels, cleaned text and a train/test split,
//! - [feature selection](feature_selection/index.html) by model importance, variance or chi-squared,
//! - [evaluators](evaluation/index.html) and the community-majority baseline,
//! - [CSV and table output](output/index.html).
//!
//! # Using `graphofdocs`
//!
//! - import the prelude for the linear algebra primitives and common traits:
//!
//! ```
//! use graphofdocs::prelude::*;
//! ```
//!
//! - the `graph-of-docs` binary runs a whole experiment from a
//!   [configuration file](config/index.html).
//!
//! # Examples
//!
//! ## Bag-of-words classification
//!
//! ```
//! use graphofdocs::prelude::*;
//! use graphofdocs::cross_validation::train_test_split;
//! use graphofdocs::feature_extraction::CountVectorizer;
//! use graphofdocs::naive_bayes::Hyperparameters;
//! use graphofdocs::metrics::accuracy_score;
//!
//! let texts = vec!["cheap pills cheap", "meeting at noon", "cheap offer now",
//!                  "lunch meeting today", "buy cheap now", "noon agenda meeting"];
//! let y = Array::from(vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
//!
//! let mut vectorizer = CountVectorizer::new();
//! let X = vectorizer.fit_transform(&texts).unwrap();
//!
//! let (train, test) = train_test_split(X.rows(), 0.33, 42).unwrap();
//!
//! let mut model = Hyperparameters::new(X.cols()).build();
//! model.fit(&X.get_rows(&train), &y.get_rows(&train)).unwrap();
//!
//! let prediction = model.predict(&X.get_rows(&test)).unwrap();
//! let accuracy = accuracy_score(&y.get_rows(&test), &prediction);
//!
//! assert!((0.0..=1.0).contains(&accuracy));
//! ```

// Allow conventional capital X for feature arrays.
#![allow(non_snake_case)]

pub mod array;
pub mod community;
pub mod config;
pub mod cross_validation;
pub mod datasets;
pub mod error;
pub mod evaluation;
pub mod feature_extraction;
pub mod feature_selection;
pub mod frame;
pub mod graph;
pub mod linear_models;
pub mod metrics;
pub mod multiclass;
pub mod naive_bayes;
pub mod neighbors;
pub mod output;
pub mod text;
pub mod traits;

pub use crate::error::{Error, Result};


#[allow(unused_imports)]
pub mod prelude {
    //! Basic data structures and traits used throughout `graphofdocs`.
    pub use crate::array::prelude::*;
    pub use crate::traits::*;
}
