//! Sparse matrices.
//!
//! Two sparse matrices are implemented: `SparseRowArray` and `SparseColumnArray`.
//! Feature matrices produced by the vectorizers are `SparseRowArray`s (one row per
//! document); feature selectors convert them into `SparseColumnArray`s to compute
//! per-column statistics.
//!
//! # Examples
//!
//! ## Creating and populating an array
//!
//! ```
//! use graphofdocs::prelude::*;
//!
//! let mut array = SparseRowArray::zeros(20, 5);
//!
//! array.set(0, 2, 5.0);
//!
//! assert!(array.get(0, 2) == 5.0);
//! assert!(array.nnz() == 1);
//! ```
//!
//! ## Keeping a subset of columns
//!
//! ```
//! use graphofdocs::prelude::*;
//!
//! let array = SparseRowArray::from(&Array::from(&vec![vec![1.0, 0.0, 3.0],
//!                                                     vec![0.0, 2.0, 4.0]]));
//!
//! let selected = array.get_columns(&vec![0, 2]);
//!
//! assert!(selected.cols() == 2);
//! assert!(selected.get(1, 1) == 4.0);
//! ```
use std::iter::Iterator;

use serde::{Deserialize, Serialize};

use crate::array::dense::*;
use crate::array::traits::*;


/// A sparse matrix with entries arranged row-wise.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
pub struct SparseRowArray {
    rows: usize,
    cols: usize,
    indices: Vec<Vec<usize>>,
    data: Vec<Vec<f32>>,
}


/// A sparse matrix with entries arranged column-wise.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug)]
pub struct SparseColumnArray {
    rows: usize,
    cols: usize,
    indices: Vec<Vec<usize>>,
    data: Vec<Vec<f32>>,
}


/// A view into a row or a column of an existing sparse matrix.
#[derive(Clone, Debug)]
pub struct SparseArrayView<'a> {
    indices: &'a [usize],
    data: &'a [f32],
}


/// Iterator over nonzero entries of a `SparseArrayView`.
pub struct SparseArrayViewIterator<'a> {
    idx: usize,
    view: SparseArrayView<'a>,
}


/// Iterator over row or column views of a sparse matrix.
pub struct SparseArrayIterator<'a> {
    idx: usize,
    dim: usize,
    indices: &'a [Vec<usize>],
    data: &'a [Vec<f32>],
}


impl IndexableMatrix for SparseRowArray {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    unsafe fn get_unchecked(&self, row: usize, column: usize) -> f32 {
        get(row, column, &self.indices, &self.data, MatrixOrder::RowMajor)
    }

    unsafe fn get_unchecked_mut(&mut self, row: usize, column: usize) -> &mut f32 {
        get_mut(row, column, &mut self.indices, &mut self.data, MatrixOrder::RowMajor)
    }

    unsafe fn set_unchecked(&mut self, row: usize, column: usize, value: f32) {
        if value != 0.0 {
            *self.get_unchecked_mut(row, column) = value;
        }
    }
}


impl IndexableMatrix for SparseColumnArray {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    unsafe fn get_unchecked(&self, row: usize, column: usize) -> f32 {
        get(row, column, &self.indices, &self.data, MatrixOrder::ColumnMajor)
    }

    unsafe fn get_unchecked_mut(&mut self, row: usize, column: usize) -> &mut f32 {
        get_mut(row, column, &mut self.indices, &mut self.data, MatrixOrder::ColumnMajor)
    }

    unsafe fn set_unchecked(&mut self, row: usize, column: usize, value: f32) {
        if value != 0.0 {
            *self.get_unchecked_mut(row, column) = value;
        }
    }
}


unsafe fn get(row: usize,
              col: usize,
              array_indices: &[Vec<usize>],
              array_data: &[Vec<f32>],
              order: MatrixOrder)
              -> f32 {

    let (index, indices, data) = match order {
        MatrixOrder::RowMajor => (col, array_indices.get_unchecked(row), array_data.get_unchecked(row)),
        MatrixOrder::ColumnMajor => (row, array_indices.get_unchecked(col), array_data.get_unchecked(col)),
    };

    match indices.binary_search(&index) {
        Ok(idx) => *data.get_unchecked(idx),
        Err(_) => 0.0,
    }
}


unsafe fn get_mut<'a>(row: usize,
                      col: usize,
                      array_indices: &'a mut [Vec<usize>],
                      array_data: &'a mut [Vec<f32>],
                      order: MatrixOrder)
                      -> &'a mut f32 {

    let (index, indices, data) = match order {
        MatrixOrder::RowMajor => (col, array_indices.get_unchecked_mut(row), array_data.get_unchecked_mut(row)),
        MatrixOrder::ColumnMajor => (row, array_indices.get_unchecked_mut(col), array_data.get_unchecked_mut(col)),
    };

    match indices.binary_search(&index) {
        Ok(idx) => data.get_unchecked_mut(idx),
        Err(idx) => {
            indices.insert(idx, index);
            data.insert(idx, 0.0);
            data.get_unchecked_mut(idx)
        }
    }
}


impl SparseRowArray {
    /// Initialise an empty (`rows` by `cols`) matrix.
    pub fn zeros(rows: usize, cols: usize) -> SparseRowArray {
        SparseRowArray {
            rows,
            cols,
            indices: vec![Vec::new(); rows],
            data: vec![Vec::new(); rows],
        }
    }

    /// Build a matrix from per-row `(column, value)` entries.
    ///
    /// Entries may come in any order; repeated columns within a row
    /// are summed and zero values are dropped.
    ///
    /// # Panics
    /// Will panic if a column index is not smaller than `cols`.
    pub fn from_rows(cols: usize, rows: Vec<Vec<(usize, f32)>>) -> SparseRowArray {

        let mut array = SparseRowArray::zeros(rows.len(), cols);

        for (row_idx, mut entries) in rows.into_iter().enumerate() {
            entries.sort_by_key(|&(col, _)| col);

            let row_indices = &mut array.indices[row_idx];
            let row_data = &mut array.data[row_idx];

            for (col, value) in entries {
                assert!(col < cols, "Column index {} out of bounds for {} columns", col, cols);

                if row_indices.last() == Some(&col) {
                    if let Some(last) = row_data.last_mut() {
                        *last += value;
                    }
                } else {
                    row_indices.push(col);
                    row_data.push(value);
                }
            }

            while let Some(pos) = row_data.iter().position(|&value| value == 0.0) {
                row_indices.remove(pos);
                row_data.remove(pos);
            }
        }

        array
    }

    /// Return the number of nonzero entries.
    pub fn nnz(&self) -> usize {
        self.indices.iter().map(|x| x.len()).sum()
    }

    pub fn todense(&self) -> Array {

        let mut array = Array::zeros(self.rows, self.cols);

        for (row_idx, (row_indices, row_values)) in self.indices.iter().zip(self.data.iter()).enumerate() {
            for (&col_idx, &value) in row_indices.iter().zip(row_values.iter()) {
                array.set(row_idx, col_idx, value);
            }
        }

        array
    }
}


impl<'a> From<&'a Array> for SparseRowArray {
    fn from(array: &Array) -> SparseRowArray {

        let mut sparse = SparseRowArray::zeros(array.rows(), array.cols());

        for (row_idx, row) in array.iter_rows().enumerate() {
            for (col_idx, value) in row.iter_nonzero() {
                sparse.set(row_idx, col_idx, value);
            }
        }

        sparse
    }
}


impl<'a> RowIterable for &'a SparseRowArray {
    type Item = SparseArrayView<'a>;
    type Output = SparseArrayIterator<'a>;
    fn iter_rows(self) -> SparseArrayIterator<'a> {
        SparseArrayIterator {
            idx: 0,
            dim: self.rows,
            indices: &self.indices,
            data: &self.data,
        }
    }

    fn view_row(self, idx: usize) -> SparseArrayView<'a> {
        SparseArrayView {
            indices: &self.indices[idx],
            data: &self.data[idx],
        }
    }
}


impl SparseColumnArray {
    /// Initialise an empty (`rows` by `cols`) matrix.
    pub fn zeros(rows: usize, cols: usize) -> SparseColumnArray {
        SparseColumnArray {
            rows,
            cols,
            indices: vec![Vec::new(); cols],
            data: vec![Vec::new(); cols],
        }
    }

    /// Return the number of nonzero entries.
    pub fn nnz(&self) -> usize {
        self.indices.iter().map(|x| x.len()).sum()
    }
}


impl<'a> From<&'a SparseRowArray> for SparseColumnArray {
    fn from(array: &SparseRowArray) -> SparseColumnArray {

        let mut sparse = SparseColumnArray::zeros(array.rows(), array.cols());

        // Rows are visited in ascending order, so pushing keeps
        // every column's row indices sorted.
        for (row_idx, row) in array.iter_rows().enumerate() {
            for (col_idx, value) in row.iter_nonzero() {
                sparse.indices[col_idx].push(row_idx);
                sparse.data[col_idx].push(value);
            }
        }

        sparse
    }
}


impl<'a> ColumnIterable for &'a SparseColumnArray {
    type Item = SparseArrayView<'a>;
    type Output = SparseArrayIterator<'a>;
    fn iter_columns(self) -> SparseArrayIterator<'a> {
        SparseArrayIterator {
            idx: 0,
            dim: self.cols,
            indices: &self.indices,
            data: &self.data,
        }
    }

    fn view_column(self, idx: usize) -> SparseArrayView<'a> {
        SparseArrayView {
            indices: &self.indices[idx],
            data: &self.data[idx],
        }
    }
}


impl<'a> NonzeroIterable for SparseArrayView<'a> {
    type Output = SparseArrayViewIterator<'a>;
    fn iter_nonzero(&self) -> SparseArrayViewIterator<'a> {
        SparseArrayViewIterator {
            idx: 0,
            view: self.clone(),
        }
    }
}


impl<'a> SparseArrayView<'a> {
    /// Returns a reference to indices of nonzero entries of the view.
    pub fn indices(&self) -> &[usize] {
        self.indices
    }

    /// Returns a reference to values of nonzero entries of the view.
    pub fn data(&self) -> &[f32] {
        self.data
    }

    /// Returns the count of  nonzero entries of the view.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }
}


impl<'a> Iterator for SparseArrayViewIterator<'a> {
    type Item = (usize, f32);

    fn next(&mut self) -> Option<(usize, f32)> {

        let result = if self.idx < self.view.indices.len() {
            Some((self.view.indices[self.idx], self.view.data[self.idx]))
        } else {
            None
        };

        self.idx += 1;

        result
    }
}


impl<'a> Iterator for SparseArrayIterator<'a> {
    type Item = SparseArrayView<'a>;

    fn next(&mut self) -> Option<SparseArrayView<'a>> {

        let result = if self.idx < self.dim {
            Some(SparseArrayView {
                indices: &self.indices[self.idx][..],
                data: &self.data[self.idx][..],
            })
        } else {
            None
        };

        self.idx += 1;

        result
    }
}


impl RowIndex<Vec<usize>> for SparseRowArray {
    type Output = SparseRowArray;
    fn get_rows(&self, index: &Vec<usize>) -> SparseRowArray {

        let mut indices = Vec::with_capacity(index.len());
        let mut data = Vec::with_capacity(index.len());

        for &row_idx in index {
            indices.push(self.indices[row_idx].clone());
            data.push(self.data[row_idx].clone());
        }

        SparseRowArray {
            rows: index.len(),
            cols: self.cols,
            indices,
            data,
        }
    }
}


impl ColumnIndex<Vec<usize>> for SparseRowArray {
    type Output = SparseRowArray;
    fn get_columns(&self, index: &Vec<usize>) -> SparseRowArray {

        let mut remap = vec![None; self.cols];

        for (new_idx, &old_idx) in index.iter().enumerate() {
            remap[old_idx] = Some(new_idx);
        }

        let rows = self.iter_rows()
            .map(|row| {
                row.iter_nonzero()
                    .filter_map(|(col, value)| remap[col].map(|new_col| (new_col, value)))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        SparseRowArray::from_rows(index.len(), rows)
    }
}
