//! Linear models.

pub mod sgdclassifier;
