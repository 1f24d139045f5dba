//! Validation via random shuffling of the data and splitting into a
//! training and test set.
//!
//! The held-out part takes `ceil(test_size * n_samples)` rows and the
//! training part takes the rest. A seeded split is fully reproducible:
//! the same seed and sample count always give the same positions.
//!
//! # Examples
//!
//! ```
//! use graphofdocs::prelude::*;
//! use graphofdocs::cross_validation::ShuffleSplit;
//!
//! let X = SparseRowArray::zeros(30, 4);
//! let y = Array::zeros(30, 1);
//!
//! for (train_idx, test_idx) in ShuffleSplit::new(X.rows(), 3, 0.2).seed(42) {
//!
//!     let X_train = X.get_rows(&train_idx);
//!     let y_train = y.get_rows(&train_idx);
//!     let X_test = X.get_rows(&test_idx);
//!     let y_test = y.get_rows(&test_idx);
//!
//!     assert!(X_train.rows() == 24 && X_test.rows() == 6);
//!     assert!(y_train.rows() == 24 && y_test.rows() == 6);
//! }
//! ```

use std::iter::Iterator;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


pub struct ShuffleSplit {
    n: usize,
    n_iter: usize,
    test_size: f32,
    rng: StdRng,
    iter: usize,
}


impl ShuffleSplit {
    /// Create a new instance of the shuffle split utility.
    ///
    /// Iterating over it will split the dataset of size `n_samples`
    /// into a test set of `ceil(test_size * n_samples)` rows and a train
    /// set of the remaining rows, `n_iter` times.
    pub fn new(n_samples: usize, n_iter: usize, test_size: f32) -> ShuffleSplit {
        ShuffleSplit {
            n: n_samples,
            n_iter,
            test_size,
            rng: StdRng::from_entropy(),
            iter: 0,
        }
    }

    /// Set the random number generator.
    pub fn set_rng(&mut self, rng: StdRng) {
        self.rng = rng;
    }

    /// Seed the random number generator.
    pub fn seed(mut self, seed: u64) -> ShuffleSplit {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn get_shuffled_indices(&mut self) -> Vec<usize> {
        let mut indices = (0..self.n).collect::<Vec<usize>>();
        indices.shuffle(&mut self.rng);

        indices
    }
}


fn test_rows(n_samples: usize, test_size: f32) -> usize {
    ((n_samples as f32 * test_size).ceil() as usize).min(n_samples)
}


impl Iterator for ShuffleSplit {
    type Item = (Vec<usize>, Vec<usize>);
    fn next(&mut self) -> Option<(Vec<usize>, Vec<usize>)> {

        let ret = match self.iter < self.n_iter {
            true => {
                let n_test = test_rows(self.n, self.test_size);
                let shuffled_indices = self.get_shuffled_indices();
                let (test, train) = shuffled_indices.split_at(n_test);
                Some((train.to_owned(), test.to_owned()))
            }
            false => None,
        };

        self.iter += 1;
        ret
    }
}


/// Shuffle the positions `0..n_samples` with a seeded generator.
pub fn shuffled_positions(n_samples: usize, seed: u64) -> Vec<usize> {
    let mut indices = (0..n_samples).collect::<Vec<usize>>();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    indices
}


/// Split `n_samples` positions once into `(train, test)`.
///
/// Fails when `test_size` lies outside `(0, 1)` or when either side of
/// the split would be empty.
pub fn train_test_split(n_samples: usize,
                        test_size: f32,
                        seed: u64)
                        -> Result<(Vec<usize>, Vec<usize>), &'static str> {

    if !(test_size > 0.0 && test_size < 1.0) {
        return Err("Test size must lie strictly between 0 and 1");
    }

    let n_test = test_rows(n_samples, test_size);

    if n_test == 0 || n_test >= n_samples {
        return Err("Split leaves an empty training or test set");
    }

    let mut split = ShuffleSplit::new(n_samples, 1, test_size).seed(seed);

    split.next().ok_or("Split produced no partition")
}
