use std::error::Error;
use std::fmt;

/// Coarse classification of a [`KernelError`], used by the boundary layer
/// to report the failure category without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Shape,
    Validation,
    Index,
    SingularMatrix,
    Overflow,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Shape => "shape",
            ErrorKind::Validation => "validation",
            ErrorKind::Index => "index",
            ErrorKind::SingularMatrix => "singular_matrix",
            ErrorKind::Overflow => "overflow",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by kernel operations and validated constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// A matrix with zero rows or zero columns.
    EmptyMatrix,
    /// A vector with no entries.
    EmptyVector,
    /// Row `row` has `found` entries while the first row has `expected`.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A flat buffer whose length does not match the requested shape.
    BufferLength {
        rows: usize,
        cols: usize,
        len: usize,
    },
    /// Operand shapes are incompatible for `operation`.
    DimensionMismatch {
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// `operation` requires a square matrix.
    NotSquare {
        operation: &'static str,
        rows: usize,
        cols: usize,
    },
    /// Non-finite matrix entry at (`row`, `col`).
    NonFiniteEntry { row: usize, col: usize },
    /// Non-finite vector entry at `index`.
    NonFiniteComponent { index: usize },
    /// Non-finite scalar operand.
    NonFiniteScalar,
    /// Negative or non-finite tolerance in a kernel configuration.
    InvalidTolerance(f64),
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Elimination found fewer than `n` pivots for an inverse.
    SingularMatrix { rank: usize, size: usize },
    /// Finite operands whose result falls outside the finite range of f64.
    Overflow { operation: &'static str },
}

impl KernelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KernelError::EmptyMatrix
            | KernelError::EmptyVector
            | KernelError::RaggedRow { .. }
            | KernelError::BufferLength { .. }
            | KernelError::DimensionMismatch { .. }
            | KernelError::NotSquare { .. } => ErrorKind::Shape,
            KernelError::NonFiniteEntry { .. }
            | KernelError::NonFiniteComponent { .. }
            | KernelError::NonFiniteScalar
            | KernelError::InvalidTolerance(_) => ErrorKind::Validation,
            KernelError::IndexOutOfBounds { .. } => ErrorKind::Index,
            KernelError::SingularMatrix { .. } => ErrorKind::SingularMatrix,
            KernelError::Overflow { .. } => ErrorKind::Overflow,
        }
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KernelError::EmptyMatrix => write!(f, "Matrix must have at least one row and one column"),
            KernelError::EmptyVector => write!(f, "Vector must have at least one entry"),
            KernelError::RaggedRow { row, expected, found } => write!(
                f,
                "All rows must have the same length: row {} has {} entries, expected {}",
                row, found, expected
            ),
            KernelError::BufferLength { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            KernelError::DimensionMismatch { operation, left, right } => write!(
                f,
                "Incompatible dimensions for {}: {}x{} and {}x{}",
                operation, left.0, left.1, right.0, right.1
            ),
            KernelError::NotSquare { operation, rows, cols } => write!(
                f,
                "{} requires a square matrix, got {}x{}",
                operation, rows, cols
            ),
            KernelError::NonFiniteEntry { row, col } => {
                write!(f, "Matrix entry ({}, {}) is not a finite number", row, col)
            }
            KernelError::NonFiniteComponent { index } => {
                write!(f, "Vector entry {} is not a finite number", index)
            }
            KernelError::NonFiniteScalar => write!(f, "Scalar operand must be a finite number"),
            KernelError::InvalidTolerance(value) => write!(
                f,
                "Pivot tolerance must be finite and non-negative, got {}",
                value
            ),
            KernelError::IndexOutOfBounds { row, col, rows, cols } => write!(
                f,
                "Index ({}, {}) out of bounds for {}x{} matrix",
                row, col, rows, cols
            ),
            KernelError::SingularMatrix { rank, size } => write!(
                f,
                "Matrix is singular (rank {} < {}), inverse does not exist",
                rank, size
            ),
            KernelError::Overflow { operation } => write!(
                f,
                "Result of {} is not representable as a finite number",
                operation
            ),
        }
    }
}

impl Error for KernelError {}

pub type Result<T> = std::result::Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(KernelError::EmptyMatrix.kind(), ErrorKind::Shape);
        assert_eq!(
            KernelError::NonFiniteEntry { row: 0, col: 1 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            KernelError::SingularMatrix { rank: 1, size: 2 }.kind(),
            ErrorKind::SingularMatrix
        );
        assert_eq!(ErrorKind::SingularMatrix.to_string(), "singular_matrix");
        assert_eq!(
            KernelError::Overflow { operation: "inverse" }.kind(),
            ErrorKind::Overflow
        );
        assert_eq!(ErrorKind::Overflow.to_string(), "overflow");
    }

    #[test]
    fn display_mentions_dimensions() {
        let err = KernelError::DimensionMismatch {
            operation: "multiplication",
            left: (2, 3),
            right: (2, 3),
        };
        assert_eq!(
            err.to_string(),
            "Incompatible dimensions for multiplication: 2x3 and 2x3"
        );
    }
}
