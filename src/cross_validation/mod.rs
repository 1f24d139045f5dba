//! Cross validation utilities.

pub mod shuffle_split;

pub use self::shuffle_split::{shuffled_positions, train_test_split, ShuffleSplit};
