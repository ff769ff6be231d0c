//! Row reduction with partial pivoting.
//!
//! Every elimination-based operation (determinant, rank, inverse, solve)
//! goes through [`eliminate`]. The routine works on a private copy of its
//! input and always terminates with a (possibly rank-deficient) reduction;
//! classifying the outcome is left to the caller.

use crate::config::KernelConfig;
use crate::math::Matrix;

/// How far elimination proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Row-echelon form. Pivots keep their values; entries below them are zero.
    Echelon,
    /// Reduced row-echelon form (Gauss-Jordan). Pivots are 1 and the rest of
    /// each pivot column is zero.
    Reduced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pivot {
    pub row: usize,
    pub col: usize,
}

/// Outcome of one elimination pass.
#[derive(Debug, Clone)]
pub struct PivotPlan {
    /// The reduced working copy, including any augmented columns.
    pub reduced: Matrix,
    /// Pivot positions in the order they were chosen. Rows are `0..rank`.
    pub pivots: Vec<Pivot>,
    /// `+1.0` for an even number of row swaps, `-1.0` for odd.
    pub sign: f64,
}

impl PivotPlan {
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    pub fn pivot_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.pivots.iter().map(move |p| self.reduced[(p.row, p.col)])
    }

    /// Columns among `0..columns` that received no pivot.
    pub fn free_columns(&self, columns: usize) -> Vec<usize> {
        (0..columns)
            .filter(|c| !self.pivots.iter().any(|p| p.col == *c))
            .collect()
    }
}

/// Reduce `matrix` using partial pivoting.
///
/// Only the first `pivot_columns` columns are searched for pivots; columns to
/// the right (an augmented right-hand side or identity block) take part in
/// every row operation but are never pivots. At each pivot column the
/// unreduced row with the largest magnitude wins, ties going to the lowest
/// row index. A column whose best candidate is at or below the tolerance
/// threshold contributes no pivot.
pub fn eliminate(
    matrix: &Matrix,
    pivot_columns: usize,
    reduction: Reduction,
    config: &KernelConfig,
) -> PivotPlan {
    let mut m = matrix.clone();
    let nrows = m.nrows();
    let pivot_columns = pivot_columns.min(m.ncols());
    let threshold = config.threshold(m.max_abs_in_columns(pivot_columns));

    let mut pivots = Vec::with_capacity(nrows.min(pivot_columns));
    let mut sign = 1.0;
    let mut pivot_row = 0;

    for col in 0..pivot_columns {
        if pivot_row == nrows {
            break;
        }

        let mut best_row = pivot_row;
        let mut best_abs = m[(pivot_row, col)].abs();
        for row in pivot_row + 1..nrows {
            let candidate = m[(row, col)].abs();
            if candidate > best_abs {
                best_row = row;
                best_abs = candidate;
            }
        }

        if best_abs <= threshold {
            log::trace!(
                "column {} has no pivot (max |a| = {:e} <= {:e})",
                col,
                best_abs,
                threshold
            );
            continue;
        }

        if best_row != pivot_row {
            log::trace!("swapping rows {} and {} for column {}", pivot_row, best_row, col);
            m.swap_rows(pivot_row, best_row);
            sign = -sign;
        }

        if reduction == Reduction::Reduced {
            let inv = 1.0 / m[(pivot_row, col)];
            m.scale_row(pivot_row, inv);
            m[(pivot_row, col)] = 1.0;
        }

        let pivot = m[(pivot_row, col)];
        let targets = match reduction {
            Reduction::Echelon => pivot_row + 1..nrows,
            Reduction::Reduced => 0..nrows,
        };
        for row in targets {
            if row == pivot_row {
                continue;
            }
            let factor = m[(row, col)] / pivot;
            if factor != 0.0 {
                m.add_scaled_row(row, pivot_row, -factor);
            }
            m[(row, col)] = 0.0;
        }

        pivots.push(Pivot {
            row: pivot_row,
            col,
        });
        pivot_row += 1;
    }

    log::debug!(
        "eliminated {}x{} matrix ({:?}, {} pivot columns): rank {}, sign {}",
        m.nrows(),
        m.ncols(),
        reduction,
        pivot_columns,
        pivots.len(),
        sign
    );

    PivotPlan {
        reduced: m,
        pivots,
        sign,
    }
}
