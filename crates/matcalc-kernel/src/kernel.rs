use rayon::prelude::*;

use crate::config::KernelConfig;
use crate::error::Result;
use crate::linalg::{self, SolutionSet};
use crate::math::{Matrix, Vector};
use crate::operation::{Operation, OperationResult};
use crate::ops;

/// Entry point for every matrix operation.
///
/// A `Kernel` only holds its numerical settings. Calls share no mutable
/// state, so one kernel can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Kernel {
    config: KernelConfig,
}

impl Kernel {
    pub fn new(config: KernelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn determinant(&self, a: &Matrix) -> Result<f64> {
        linalg::determinant(a, &self.config)
    }

    pub fn inverse(&self, a: &Matrix) -> Result<Matrix> {
        linalg::inverse(a, &self.config)
    }

    pub fn rank(&self, a: &Matrix) -> usize {
        linalg::rank(a, &self.config)
    }

    pub fn solve(&self, a: &Matrix, b: &Vector) -> Result<SolutionSet> {
        linalg::solve(a, b, &self.config)
    }

    pub fn add(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        ops::add(a, b)
    }

    pub fn subtract(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        ops::subtract(a, b)
    }

    pub fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        ops::multiply(a, b)
    }

    pub fn scalar_multiply(&self, a: &Matrix, k: f64) -> Result<Matrix> {
        ops::scalar_multiply(a, k)
    }

    pub fn transpose(&self, a: &Matrix) -> Matrix {
        ops::transpose(a)
    }

    /// Run a single operation.
    pub fn execute(&self, operation: &Operation) -> Result<OperationResult> {
        log::debug!("executing {}", operation.kind());
        let result = match operation {
            Operation::Determinant { matrix } => OperationResult::Scalar(self.determinant(matrix)?),
            Operation::Inverse { matrix } => OperationResult::Matrix(self.inverse(matrix)?),
            Operation::Rank { matrix } => OperationResult::Rank(self.rank(matrix)),
            Operation::Transpose { matrix } => OperationResult::Matrix(self.transpose(matrix)),
            Operation::Add { matrix_a, matrix_b } => {
                OperationResult::Matrix(self.add(matrix_a, matrix_b)?)
            }
            Operation::Subtract { matrix_a, matrix_b } => {
                OperationResult::Matrix(self.subtract(matrix_a, matrix_b)?)
            }
            Operation::Multiply { matrix_a, matrix_b } => {
                OperationResult::Matrix(self.multiply(matrix_a, matrix_b)?)
            }
            Operation::ScalarMultiply { matrix, scalar } => {
                OperationResult::Matrix(self.scalar_multiply(matrix, *scalar)?)
            }
            Operation::Solve {
                coefficients,
                constants,
            } => OperationResult::Solution(self.solve(coefficients, constants)?),
        };
        Ok(result)
    }

    /// Run independent operations in parallel. Results keep input order.
    pub fn execute_batch(&self, operations: &[Operation]) -> Vec<Result<OperationResult>> {
        log::info!("Executing batch of {} operations", operations.len());
        operations
            .par_iter()
            .map(|operation| self.execute(operation))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KernelError;

    fn mat(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        assert_eq!(
            Kernel::new(KernelConfig::new(-1.0, true)).unwrap_err(),
            KernelError::InvalidTolerance(-1.0)
        );
    }

    #[test]
    fn execute_dispatches_by_operation() {
        let kernel = Kernel::default();
        let result = kernel
            .execute(&Operation::Rank {
                matrix: mat(vec![vec![1.0, 2.0], vec![2.0, 4.0]]),
            })
            .unwrap();
        assert_eq!(result, OperationResult::Rank(1));

        let err = kernel
            .execute(&Operation::Inverse {
                matrix: mat(vec![vec![1.0, 2.0], vec![2.0, 4.0]]),
            })
            .unwrap_err();
        assert!(matches!(err, KernelError::SingularMatrix { .. }));
    }

    #[test]
    fn batch_preserves_order() {
        let kernel = Kernel::default();
        let ops: Vec<Operation> = (1..=20)
            .map(|k| Operation::Determinant {
                matrix: mat(vec![vec![k as f64, 0.0], vec![0.0, 1.0]]),
            })
            .collect();
        let results = kernel.execute_batch(&ops);
        for (k, result) in (1..=20).zip(results) {
            assert_eq!(result.unwrap(), OperationResult::Scalar(k as f64));
        }
    }
}
