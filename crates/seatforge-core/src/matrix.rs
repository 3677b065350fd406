use crate::error::{SeatingError, SfResult};
use rayon::prelude::*;
use std::ops::Range;

/// Dense row-major matrix backed by a single flat buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }

    /// Builds a matrix from nested rows. `cols` is only consulted when there
    /// are no rows to infer it from.
    pub fn from_rows(rows: &[Vec<T>], cols: usize) -> SfResult<Self> {
        let width = rows.first().map_or(cols, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(SeatingError::Validation(format!(
                    "ragged matrix: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols: width,
            data,
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(|r| r.to_vec()).collect()
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn get(&self, r: usize, c: usize) -> T {
        self.data[r * self.cols + c]
    }

    #[inline(always)]
    pub fn set(&mut self, r: usize, c: usize, value: T) {
        self.data[r * self.cols + c] = value;
    }

    #[inline(always)]
    pub fn row(&self, r: usize) -> &[T] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.data[c * self.rows + r] = self.data[r * self.cols + c];
            }
        }
        out
    }

    /// Exchanges `row_a[cols]` with `row_b[cols]`.
    pub fn swap_row_segments(&mut self, row_a: usize, row_b: usize, cols: Range<usize>) {
        if row_a == row_b {
            return;
        }
        let width = self.cols;
        for c in cols {
            self.data.swap(row_a * width + c, row_b * width + c);
        }
    }

    /// Exchanges columns `col_a` and `col_b` over the given rows.
    pub fn swap_column_segments(&mut self, col_a: usize, col_b: usize, rows: Range<usize>) {
        if col_a == col_b {
            return;
        }
        let width = self.cols;
        for r in rows {
            self.data.swap(r * width + col_a, r * width + col_b);
        }
    }
}

impl Matrix<u8> {
    /// Computes `(self ⊙ column_weights) × rhs` into a `rows × rhs.cols` matrix.
    ///
    /// Rows of the product are independent, so they are filled in parallel.
    /// The inner loop walks `rhs` row by row, which keeps both operands
    /// streaming through memory in order.
    pub fn weighted_product(&self, column_weights: &[u32], rhs: &Matrix<u8>) -> Matrix<u32> {
        debug_assert_eq!(self.cols, rhs.rows);
        debug_assert_eq!(self.cols, column_weights.len());

        let n = rhs.cols;
        let mut out = Matrix::<u32>::zeros(self.rows, n);
        if n == 0 {
            return out;
        }

        out.data
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(r, out_row)| {
                let lhs_row = self.row(r);
                for (k, &a) in lhs_row.iter().enumerate() {
                    if a == 0 {
                        continue;
                    }
                    let scale = a as u32 * column_weights[k];
                    for (acc, &b) in out_row.iter_mut().zip(rhs.row(k)) {
                        *acc += scale * b as u32;
                    }
                }
            });
        out
    }
}

impl Matrix<u32> {
    pub fn zero_diagonal(&mut self) {
        let size = self.rows.min(self.cols);
        for i in 0..size {
            self.data[i * self.cols + i] = 0;
        }
    }

    pub fn max(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}
