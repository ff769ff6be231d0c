use crate::config::KernelConfig;
use crate::elimination::{eliminate, Reduction};
use crate::error::{KernelError, Result};
use crate::math::Matrix;

/// Inverse of a square matrix by Gauss-Jordan elimination on `[A | I]`.
///
/// Fails with [`KernelError::SingularMatrix`] when elimination finds fewer
/// than `n` pivots in the left block, and with [`KernelError::Overflow`] when
/// an accepted pivot is so small that the inverse leaves the finite range.
pub fn inverse(a: &Matrix, config: &KernelConfig) -> Result<Matrix> {
    if !a.is_square() {
        return Err(KernelError::NotSquare {
            operation: "inverse",
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }

    let n = a.nrows();
    let augmented = a.augment(&Matrix::identity(n)?)?;
    let plan = eliminate(&augmented, n, Reduction::Reduced, config);

    if plan.rank() < n {
        log::warn!(
            "inverse requested for singular {}x{} matrix (rank {})",
            n,
            n,
            plan.rank()
        );
        return Err(KernelError::SingularMatrix {
            rank: plan.rank(),
            size: n,
        });
    }

    plan.reduced.select_columns(n, 2 * n).into_result("inverse")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::multiply;

    fn mat(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn diagonal_inverse() {
        let inv = inverse(&mat(vec![vec![2.0, 0.0], vec![0.0, 2.0]]), &KernelConfig::default()).unwrap();
        assert!(inv.approx_eq(&mat(vec![vec![0.5, 0.0], vec![0.0, 0.5]]), 1e-15));
    }

    #[test]
    fn two_by_two_general() {
        let inv = inverse(&mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]]), &KernelConfig::default()).unwrap();
        let expected = mat(vec![vec![-2.0, 1.0], vec![1.5, -0.5]]);
        assert!(inv.approx_eq(&expected, 1e-12), "{}", inv);
    }

    #[test]
    fn needs_pivoting() {
        let a = mat(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![4.0, -3.0, 8.0],
        ]);
        let inv = inverse(&a, &KernelConfig::default()).unwrap();
        let product = multiply(&a, &inv).unwrap();
        assert!(product.approx_eq(&Matrix::identity(3).unwrap(), 1e-12), "{}", product);
    }

    #[test]
    fn singular_matrices_fail() {
        let err = inverse(&mat(vec![vec![1.0, 2.0], vec![2.0, 4.0]]), &KernelConfig::default()).unwrap_err();
        assert_eq!(err, KernelError::SingularMatrix { rank: 1, size: 2 });

        let err = inverse(&mat(vec![vec![0.0]]), &KernelConfig::default()).unwrap_err();
        assert_eq!(err, KernelError::SingularMatrix { rank: 0, size: 1 });
    }

    #[test]
    fn subnormal_pivot_overflows() {
        let overflow = KernelError::Overflow {
            operation: "inverse",
        };
        let err = inverse(&mat(vec![vec![1e-310]]), &KernelConfig::default()).unwrap_err();
        assert_eq!(err, overflow);

        let a = mat(vec![vec![1e-310, 0.0], vec![0.0, 1e-310]]);
        assert_eq!(inverse(&a, &KernelConfig::default()).unwrap_err(), overflow);

        let inv = inverse(&mat(vec![vec![1e-300]]), &KernelConfig::default()).unwrap();
        assert_eq!(inv.to_rows(), vec![vec![1e300]]);
    }

    #[test]
    fn one_by_one() {
        let inv = inverse(&mat(vec![vec![-4.0]]), &KernelConfig::default()).unwrap();
        assert_eq!(inv.to_rows(), vec![vec![-0.25]]);
    }

    #[test]
    fn rejects_non_square() {
        let a = mat(vec![vec![1.0, 2.0]]);
        assert!(matches!(
            inverse(&a, &KernelConfig::default()),
            Err(KernelError::NotSquare { .. })
        ));
    }
}
