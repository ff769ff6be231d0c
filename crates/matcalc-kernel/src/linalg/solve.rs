use serde::Serialize;

use crate::config::KernelConfig;
use crate::elimination::{eliminate, PivotPlan, Reduction};
use crate::error::{KernelError, Result};
use crate::math::{Matrix, Vector};

const SOLVE: &str = "linear system solve";

/// Classified outcome of solving `Ax = b`.
///
/// `Inconsistent` and `Underdetermined` are ordinary results, not errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SolutionSet {
    Unique {
        solution: Vector,
    },
    Inconsistent,
    /// Infinitely many solutions. `particular` sets every free variable to zero.
    Underdetermined {
        particular: Vector,
        free_variables: usize,
    },
}

/// Solve `a x = b` by forward elimination on `[a | b]` and back substitution.
pub fn solve(a: &Matrix, b: &Vector, config: &KernelConfig) -> Result<SolutionSet> {
    if !a.is_square() {
        return Err(KernelError::NotSquare {
            operation: SOLVE,
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    if b.len() != a.nrows() {
        return Err(KernelError::DimensionMismatch {
            operation: SOLVE,
            left: a.shape(),
            right: (b.len(), 1),
        });
    }

    let unknowns = a.ncols();
    let rhs = Matrix::from_shape_vec((b.len(), 1), b.to_vec())?;
    let plan = eliminate(&a.augment(&rhs)?, unknowns, Reduction::Echelon, config);

    // Residuals are measured against the scale of both A and b.
    let rhs_scale = b.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let threshold = config.threshold(a.max_abs().max(rhs_scale));
    for row in plan.rank()..a.nrows() {
        let residual = plan.reduced[(row, unknowns)];
        if !residual.is_finite() {
            return Err(KernelError::Overflow { operation: SOLVE });
        }
        if residual.abs() > threshold {
            log::debug!(
                "system is inconsistent: row {} reduces to 0 = {:e}",
                row,
                residual
            );
            return Ok(SolutionSet::Inconsistent);
        }
    }

    let x = back_substitute(&plan, unknowns)?;
    let free_variables = plan.free_columns(unknowns).len();
    if free_variables == 0 {
        Ok(SolutionSet::Unique { solution: x })
    } else {
        Ok(SolutionSet::Underdetermined {
            particular: x,
            free_variables,
        })
    }
}

/// Back substitution over the pivot rows of an echelon plan whose last
/// column is the right-hand side. Free variables are taken as zero.
fn back_substitute(plan: &PivotPlan, unknowns: usize) -> Result<Vector> {
    let m = &plan.reduced;
    let mut x = vec![0.0; unknowns];
    for pivot in plan.pivots.iter().rev() {
        let row = m.row_slice(pivot.row);
        let tail: f64 = (pivot.col + 1..unknowns).map(|j| row[j] * x[j]).sum();
        x[pivot.col] = (row[unknowns] - tail) / row[pivot.col];
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(KernelError::Overflow { operation: SOLVE });
    }
    Vector::new(x)
}
