use crate::config::KernelConfig;
use crate::elimination::{eliminate, Reduction};
use crate::error::{KernelError, Result};
use crate::math::Matrix;

/// Determinant of a square matrix.
///
/// Computed as the signed product of the echelon pivots. A matrix with fewer
/// than `n` pivots has determinant exactly `0.0`; singularity is a value
/// here, not an error.
pub fn determinant(a: &Matrix, config: &KernelConfig) -> Result<f64> {
    if !a.is_square() {
        return Err(KernelError::NotSquare {
            operation: "determinant",
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }

    let n = a.nrows();
    if n == 1 {
        return Ok(a[(0, 0)]);
    }

    let plan = eliminate(a, n, Reduction::Echelon, config);
    if plan.rank() < n {
        return Ok(0.0);
    }
    let det = plan.sign * plan.pivot_values().product::<f64>();
    if !det.is_finite() {
        return Err(KernelError::Overflow {
            operation: "determinant",
        });
    }
    Ok(det)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(rows: Vec<Vec<f64>>) -> f64 {
        determinant(&Matrix::from_rows(rows).unwrap(), &KernelConfig::default()).unwrap()
    }

    #[test]
    fn two_by_two() {
        assert!((det(vec![vec![1.0, 2.0], vec![3.0, 4.0]]) + 2.0).abs() < 1e-12);
        assert_eq!(det(vec![vec![0.0, 1.0], vec![1.0, 0.0]]), -1.0);
    }

    #[test]
    fn one_by_one_returns_entry() {
        assert_eq!(det(vec![vec![-7.5]]), -7.5);
        assert_eq!(det(vec![vec![0.0]]), 0.0);
    }

    #[test]
    fn larger_matrices() {
        let d = det(vec![
            vec![2.0, -3.0, 1.0],
            vec![2.0, 0.0, -1.0],
            vec![1.0, 4.0, 5.0],
        ]);
        assert!((d - 49.0).abs() < 1e-9);

        let d = det(vec![
            vec![1.0, 0.0, 2.0, -1.0],
            vec![3.0, 0.0, 0.0, 5.0],
            vec![2.0, 1.0, 4.0, -3.0],
            vec![1.0, 0.0, 5.0, 0.0],
        ]);
        assert!((d - 30.0).abs() < 1e-9);
    }

    #[test]
    fn overflowing_product_is_an_error() {
        let a = Matrix::from_rows(vec![vec![1e200, 0.0], vec![0.0, 1e200]]).unwrap();
        assert_eq!(
            determinant(&a, &KernelConfig::default()).unwrap_err(),
            KernelError::Overflow {
                operation: "determinant"
            }
        );
        let b = Matrix::from_rows(vec![vec![1e150, 0.0], vec![0.0, -1e150]]).unwrap();
        let det = determinant(&b, &KernelConfig::default()).unwrap();
        assert!((det / -1e300 - 1.0).abs() < 1e-12, "{}", det);
    }

    #[test]
    fn singular_is_exact_zero() {
        assert_eq!(det(vec![vec![1.0, 2.0], vec![2.0, 4.0]]), 0.0);
        assert_eq!(
            det(vec![
                vec![1.0, 2.0, 3.0],
                vec![4.0, 5.0, 6.0],
                vec![7.0, 8.0, 9.0],
            ]),
            0.0
        );
    }

    #[test]
    fn near_singular_is_small_not_error() {
        let d = det(vec![vec![1.0, 2.0], vec![2.0, 4.000001]]);
        assert!(d > 0.99999e-6 && d < 1.00111e-6, "{}", d);
    }

    #[test]
    fn large_values() {
        let d = det(vec![vec![1e6, 2e6], vec![3e6, 4e6]]);
        assert!((d + 2e12).abs() / 2e12 < 1e-12);
    }

    #[test]
    fn rejects_non_square() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        assert!(matches!(
            determinant(&a, &KernelConfig::default()),
            Err(KernelError::NotSquare { rows: 1, cols: 3, .. })
        ));
    }
}
