use crate::config::KernelConfig;
use crate::elimination::{eliminate, Reduction};
use crate::math::Matrix;

/// Number of pivots in the row-echelon form of `a`. Any shape is accepted.
pub fn rank(a: &Matrix, config: &KernelConfig) -> usize {
    eliminate(a, a.ncols(), Reduction::Echelon, config).rank()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank_of(rows: Vec<Vec<f64>>) -> usize {
        rank(&Matrix::from_rows(rows).unwrap(), &KernelConfig::default())
    }

    #[test]
    fn dependent_rows() {
        assert_eq!(rank_of(vec![vec![1.0, 2.0], vec![2.0, 4.0]]), 1);
        assert_eq!(
            rank_of(vec![
                vec![1.0, 2.0, 3.0],
                vec![4.0, 5.0, 6.0],
                vec![7.0, 8.0, 9.0],
            ]),
            2
        );
    }

    #[test]
    fn rectangular_shapes() {
        assert_eq!(rank_of(vec![vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]]), 2);
        assert_eq!(rank_of(vec![vec![1.0], vec![2.0], vec![3.0]]), 1);
        assert_eq!(rank_of(vec![vec![0.0, 0.0, 0.0]]), 0);
    }

    #[test]
    fn identity_is_full_rank() {
        let i = Matrix::identity(5).unwrap();
        assert_eq!(rank(&i, &KernelConfig::default()), 5);
    }
}
