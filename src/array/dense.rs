//! Basic two-dimensional dense matrix type.
//!
//! Dense arrays are used for label vectors and for small
//! per-row outputs such as decision function values; feature
//! matrices are sparse.
//!
//! # Creation
//!
//! ```
//! use graphofdocs::prelude::*;
//!
//! let zeros = Array::zeros(20, 10);
//! let labels = Array::from(vec![0.0, 1.0, 2.0, 3.0]);
//! let matrix = Array::from(&vec![vec![0.0, 1.0],
//!                                vec![2.0, 3.0]]);
//!
//! assert!(labels.rows() == 4 && labels.cols() == 1);
//! assert!(matrix.get(1, 0) == 2.0);
//! ```
//!
//! # Iteration
//!
//! ```
//! use graphofdocs::prelude::*;
//!
//! let array = Array::from(&vec![vec![0.0, 1.0],
//!                               vec![2.0, 3.0]]);
//!
//! let mut sum = 0.0;
//!
//! for row in array.iter_rows() {
//!     for element in row.iter() {
//!         sum += element;
//!     }
//! }
//!
//! assert!(sum == 6.0);
//! ```

use std::iter::Iterator;

use serde::{Deserialize, Serialize};

use crate::array::traits::*;


/// Basic two-dimensional, row-major dense matrix type.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
pub struct Array {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}


/// A view into a row of an existing dense matrix.
#[derive(Clone, Debug)]
pub struct ArrayView<'a> {
    data: &'a [f32],
}


/// Iterator over row views of a dense matrix.
pub struct ArrayIterator<'a> {
    idx: usize,
    array: &'a Array,
}


/// Iterator over nonzero entries of a dense matrix view.
pub struct ArrayViewNonzeroIterator<'a> {
    idx: usize,
    data: &'a [f32],
}


impl<'a> Iterator for ArrayIterator<'a> {
    type Item = ArrayView<'a>;

    fn next(&mut self) -> Option<ArrayView<'a>> {

        let result = if self.idx < self.array.rows {
            Some(self.array.view_row(self.idx))
        } else {
            None
        };

        self.idx += 1;

        result
    }
}


impl<'a> RowIterable for &'a Array {
    type Item = ArrayView<'a>;
    type Output = ArrayIterator<'a>;

    fn iter_rows(self) -> ArrayIterator<'a> {
        ArrayIterator { idx: 0, array: self }
    }

    fn view_row(self, idx: usize) -> ArrayView<'a> {
        assert!(idx < self.rows);
        let start = idx * self.cols;
        ArrayView { data: &self.data[start..start + self.cols] }
    }
}


impl<'a> ArrayView<'a> {
    /// Iterate over elements of the `ArrayView`.
    pub fn iter(&self) -> impl Iterator<Item = f32> + 'a {
        let data: &'a [f32] = self.data;
        data.iter().cloned()
    }
}


impl<'a> Iterator for ArrayViewNonzeroIterator<'a> {
    type Item = (usize, f32);

    fn next(&mut self) -> Option<(usize, f32)> {

        while self.idx < self.data.len() {
            let idx = self.idx;
            self.idx += 1;

            if self.data[idx] != 0.0 {
                return Some((idx, self.data[idx]));
            }
        }

        None
    }
}


impl<'a> NonzeroIterable for ArrayView<'a> {
    type Output = ArrayViewNonzeroIterator<'a>;
    fn iter_nonzero(&self) -> ArrayViewNonzeroIterator<'a> {
        ArrayViewNonzeroIterator { idx: 0, data: self.data }
    }
}


impl IndexableMatrix for Array {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    unsafe fn get_unchecked(&self, row: usize, col: usize) -> f32 {
        *self.data.get_unchecked(row * self.cols + col)
    }

    unsafe fn get_unchecked_mut(&mut self, row: usize, col: usize) -> &mut f32 {
        self.data.get_unchecked_mut(row * self.cols + col)
    }
}


impl Array {
    /// Create a `rows` by `cols` array of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Array {
        Array { rows, cols, data: vec![0.0; rows * cols] }
    }

    /// Create a `rows` by `cols` array of ones.
    pub fn ones(rows: usize, cols: usize) -> Array {
        Array { rows, cols, data: vec![1.0; rows * cols] }
    }

    /// Return an immutable reference to the underlying
    /// row-major data buffer of the array.
    pub fn data(&self) -> &Vec<f32> {
        &self.data
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data[..]
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data[..]
    }

    /// Compute the sum of the entries of the array.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Compute the mean of the array.
    pub fn mean(&self) -> f32 {
        self.sum() / ((self.cols * self.rows) as f32)
    }
}


impl From<Vec<f32>> for Array {
    /// Construct a column vector from a vector.
    fn from(data: Vec<f32>) -> Array {
        Array { rows: data.len(), cols: 1, data }
    }
}


impl<'a> From<&'a Vec<Vec<f32>>> for Array {
    /// Construct an array from a vector of vectors.
    ///
    /// # Panics
    /// This will panic if the input vector is emtpy
    /// or if its rows are of unequal length.
    fn from(input: &Vec<Vec<f32>>) -> Array {

        assert!(!input.is_empty());

        let rows = input.len();
        let cols = input[0].len();

        let mut data: Vec<f32> = Vec::with_capacity(rows * cols);

        for row in input {
            assert!(row.len() == cols);
            data.extend_from_slice(row);
        }

        Array { rows, cols, data }
    }
}


impl RowIndex<Vec<usize>> for Array {
    type Output = Array;
    fn get_rows(&self, index: &Vec<usize>) -> Array {

        let mut data = Vec::with_capacity(index.len() * self.cols);

        for &row_idx in index {
            data.extend(self.view_row(row_idx).iter());
        }

        Array { rows: index.len(), cols: self.cols, data }
    }
}


/// Determines whether two arrays are sufficiently close to each other.
pub fn allclose(x: &Array, y: &Array) -> bool {

    if x.rows() != y.rows() || x.cols() != y.cols() {
        return false;
    }

    x.data.iter().zip(y.data.iter()).all(|(&a, &b)| close(a, b))
}


/// Determines whether two floats are sufficiently close to each other.
pub fn close(x: f32, y: f32) -> bool {
    let tol = 1e-06;
    (x - y).abs() <= tol * y.abs().max(1.0)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_from_vec() {
        let arr = Array::from(vec![1.0, 2.0, 3.0]);

        assert!(arr.rows() == 3);
        assert!(arr.cols() == 1);
        assert!(arr.get(2, 0) == 3.0);
    }

    #[test]
    fn basic_allclose() {
        let x = Array::from(&vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let mut y = x.clone();

        assert!(allclose(&x, &y));

        y.set(1, 1, 4.1);
        assert!(!allclose(&x, &y));
        assert!(!allclose(&x, &Array::zeros(1, 2)));
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_scalar_indexing() {
        let arr = Array::zeros(2, 2);
        arr.get(2, 0);
    }

    #[test]
    fn vector_fancy_indexing() {
        let arr = Array::from(&vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);

        let selected = arr.get_rows(&vec![2, 0]);

        assert!(allclose(&selected, &Array::from(&vec![vec![5.0, 6.0], vec![1.0, 2.0]])));
        assert!(allclose(&arr.get_rows(&(1..)), &Array::from(&vec![vec![3.0, 4.0], vec![5.0, 6.0]])));
    }

    #[test]
    fn nonzero_iteration_skips_zeros() {
        let arr = Array::from(&vec![vec![0.0, 2.0, 0.0, 3.0]]);

        let nonzero = arr.view_row(0).iter_nonzero().collect::<Vec<_>>();

        assert_eq!(nonzero, vec![(1, 2.0), (3, 3.0)]);
    }
}
