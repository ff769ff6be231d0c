//! Element-wise and structural operations. No pivoting, no tolerances.

use crate::error::{KernelError, Result};
use crate::math::Matrix;

fn ensure_same_shape(operation: &'static str, a: &Matrix, b: &Matrix) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(KernelError::DimensionMismatch {
            operation,
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(())
}

fn elementwise<F>(operation: &'static str, a: &Matrix, b: &Matrix, f: F) -> Result<Matrix>
where
    F: Fn(f64, f64) -> f64,
{
    ensure_same_shape(operation, a, b)?;
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| f(*x, *y))
        .collect();
    Matrix::from_computed(operation, a.shape(), data)
}

pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    elementwise("addition", a, b, |x, y| x + y)
}

/// `a - b`, computed as `a + (-b)`.
pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    elementwise("subtraction", a, b, |x, y| x + (-y))
}

pub fn scalar_multiply(a: &Matrix, k: f64) -> Result<Matrix> {
    if !k.is_finite() {
        return Err(KernelError::NonFiniteScalar);
    }
    Matrix::from_computed(
        "scalar multiplication",
        a.shape(),
        a.as_slice().iter().map(|v| v * k).collect(),
    )
}

/// Standard matrix product. Each entry is a compensated dot product.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.ncols() != b.nrows() {
        return Err(KernelError::DimensionMismatch {
            operation: "multiplication",
            left: a.shape(),
            right: b.shape(),
        });
    }

    let (rows, inner, cols) = (a.nrows(), a.ncols(), b.ncols());
    let mut data = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        let lhs = a.row_slice(i);
        for j in 0..cols {
            data.push(compensated_sum((0..inner).map(|k| lhs[k] * b[(k, j)])));
        }
    }
    Matrix::from_computed("multiplication", (rows, cols), data)
}

pub fn transpose(a: &Matrix) -> Matrix {
    let (rows, cols) = a.shape();
    let mut out = Matrix::filled(cols, rows, 0.0);
    for i in 0..rows {
        for j in 0..cols {
            out[(j, i)] = a[(i, j)];
        }
    }
    out
}

/// Neumaier summation: a running compensation term recovers the low-order
/// bits lost when adding terms of very different magnitude.
pub(crate) fn compensated_sum<I>(terms: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0f64;
    let mut compensation = 0.0f64;
    for term in terms {
        let t = sum + term;
        if sum.abs() >= term.abs() {
            compensation += (sum - t) + term;
        } else {
            compensation += (term - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}
