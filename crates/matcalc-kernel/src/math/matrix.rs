use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};

/// Dense real matrix stored in row-major order.
///
/// Every constructed `Matrix` has at least one row and one column and only
/// finite entries. Operations never modify their operands; anything that
/// needs scratch space clones explicitly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Build a matrix from nested rows, validating shape and finiteness.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if nrows == 0 || ncols == 0 {
            return Err(KernelError::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(nrows * ncols);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(KernelError::RaggedRow {
                    row: r,
                    expected: ncols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Self::from_shape_vec((nrows, ncols), data)
    }

    /// Build a matrix from a row-major buffer.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if rows == 0 || cols == 0 {
            return Err(KernelError::EmptyMatrix);
        }
        if data.len() != rows * cols {
            return Err(KernelError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(KernelError::NonFiniteEntry {
                row: pos / cols,
                col: pos % cols,
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// The `n × n` identity. `n` must be at least 1.
    pub fn identity(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(KernelError::EmptyMatrix);
        }
        let mut m = Self::filled(n, n, 0.0);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        Ok(m)
    }

    /// Build the result of `operation` from a row-major buffer. A non-finite
    /// value here comes from finite operands, so it is an overflow rather
    /// than invalid input.
    pub(crate) fn from_computed(
        operation: &'static str,
        shape: (usize, usize),
        data: Vec<f64>,
    ) -> Result<Self> {
        if data.iter().any(|v| !v.is_finite()) {
            return Err(KernelError::Overflow { operation });
        }
        Self::from_shape_vec(shape, data)
    }

    /// Finish a kernel-internal working matrix as the result of `operation`.
    pub(crate) fn into_result(self, operation: &'static str) -> Result<Self> {
        Self::from_computed(operation, (self.rows, self.cols), self.data)
    }

    /// Unchecked constructor for kernel-internal results whose shape is
    /// non-zero by construction.
    pub(crate) fn filled(rows: usize, cols: usize, value: f64) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Bounds-checked element access.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        if row >= self.rows || col >= self.cols {
            return Err(KernelError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.data[self.offset(row, col)])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub(crate) fn row_slice_mut(&mut self, row: usize) -> &mut [f64] {
        let start = self.offset(row, 0);
        let cols = self.cols;
        &mut self.data[start..start + cols]
    }

    /// Largest absolute value among the first `cols` columns.
    pub fn max_abs_in_columns(&self, cols: usize) -> f64 {
        let cols = cols.min(self.cols);
        (0..self.rows)
            .flat_map(|r| self.row_slice(r)[..cols].iter())
            .fold(0.0f64, |acc, v| acc.max(v.abs()))
    }

    pub fn max_abs(&self) -> f64 {
        self.max_abs_in_columns(self.cols)
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let cols = self.cols;
        for k in 0..cols {
            self.data.swap(a * cols + k, b * cols + k);
        }
    }

    /// `row[target] += factor * row[source]`
    pub(crate) fn add_scaled_row(&mut self, target: usize, source: usize, factor: f64) {
        for k in 0..self.cols {
            let v = self[(source, k)];
            self[(target, k)] += factor * v;
        }
    }

    pub(crate) fn scale_row(&mut self, row: usize, factor: f64) {
        for v in self.row_slice_mut(row) {
            *v *= factor;
        }
    }

    /// Copy of the columns `start..end`.
    pub fn select_columns(&self, start: usize, end: usize) -> Matrix {
        assert!(
            start < end && end <= self.cols,
            "column slice out of bounds"
        );
        let new_cols = end - start;
        let mut data = Vec::with_capacity(self.rows * new_cols);
        for row in 0..self.rows {
            data.extend_from_slice(&self.row_slice(row)[start..end]);
        }
        Matrix {
            data,
            rows: self.rows,
            cols: new_cols,
        }
    }

    /// `[self | right]` for two matrices with the same row count.
    pub fn augment(&self, right: &Matrix) -> Result<Matrix> {
        if self.rows != right.rows {
            return Err(KernelError::DimensionMismatch {
                operation: "augmentation",
                left: self.shape(),
                right: right.shape(),
            });
        }
        let cols = self.cols + right.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for row in 0..self.rows {
            data.extend_from_slice(self.row_slice(row));
            data.extend_from_slice(right.row_slice(row));
        }
        Ok(Matrix {
            data,
            rows: self.rows,
            cols,
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row_slice(r).to_vec()).collect()
    }

    /// Entry-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = KernelError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Matrix::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(value: Matrix) -> Self {
        value.to_rows()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            write!(f, "[")?;
            for (idx, value) in self.row_slice(row).iter().enumerate() {
                write!(f, "{}", value)?;
                if idx + 1 != self.cols {
                    write!(f, ", ")?;
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_rows() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap_err();
        assert_eq!(
            err,
            KernelError::RaggedRow {
                row: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn rejects_empty_and_empty_rows() {
        assert_eq!(Matrix::from_rows(vec![]), Err(KernelError::EmptyMatrix));
        assert_eq!(Matrix::from_rows(vec![vec![]]), Err(KernelError::EmptyMatrix));
    }

    #[test]
    fn rejects_non_finite_with_position() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![f64::NAN, 4.0]]).unwrap_err();
        assert_eq!(err, KernelError::NonFiniteEntry { row: 1, col: 0 });
        let err = Matrix::from_shape_vec((1, 2), vec![0.0, f64::INFINITY]).unwrap_err();
        assert_eq!(err, KernelError::NonFiniteEntry { row: 0, col: 1 });
    }

    #[test]
    fn get_is_bounds_checked() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(m.get(0, 2), Ok(3.0));
        assert!(matches!(
            m.get(1, 0),
            Err(KernelError::IndexOutOfBounds { row: 1, col: 0, .. })
        ));
    }

    #[test]
    fn augment_and_select_columns() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let i = Matrix::identity(2).unwrap();
        let aug = a.augment(&i).unwrap();
        assert_eq!(aug.shape(), (2, 4));
        assert_eq!(aug.row_slice(1), &[3.0, 4.0, 0.0, 1.0]);
        assert_eq!(aug.select_columns(2, 4), i);
    }

    #[test]
    fn swap_rows_exchanges_whole_rows() {
        let mut m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        m.swap_rows(0, 1);
        assert_eq!(m.to_rows(), vec![vec![3.0, 4.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn computed_results_report_overflow() {
        let err = Matrix::from_computed("product", (1, 2), vec![1.0, f64::INFINITY]).unwrap_err();
        assert_eq!(err, KernelError::Overflow { operation: "product" });

        let mut m = Matrix::filled(1, 1, 1.0);
        m[(0, 0)] = f64::NAN;
        assert_eq!(
            m.into_result("inverse").unwrap_err(),
            KernelError::Overflow { operation: "inverse" }
        );
    }

    #[test]
    fn deserialize_validates() {
        let m: Matrix = serde_json::from_str("[[1, 2], [3, 4]]").unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert!(serde_json::from_str::<Matrix>("[[1, 2], [3]]").is_err());
        assert!(serde_json::from_str::<Matrix>("[]").is_err());
        assert_eq!(serde_json::to_string(&m).unwrap(), "[[1.0,2.0],[3.0,4.0]]");
    }
}
