use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};

/// Numerical settings shared by every elimination-based operation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct KernelConfig {
    /// Pivot candidates with magnitude at or below the threshold are treated as zero.
    pub pivot_tolerance: f64,

    /// Scale `pivot_tolerance` by the largest absolute entry of the matrix
    /// being reduced. When false the tolerance is an absolute threshold.
    pub relative_tolerance: bool,
}

impl KernelConfig {
    pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-10;

    pub fn new(pivot_tolerance: f64, relative_tolerance: bool) -> Self {
        Self {
            pivot_tolerance,
            relative_tolerance,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.pivot_tolerance.is_finite() || self.pivot_tolerance < 0.0 {
            return Err(KernelError::InvalidTolerance(self.pivot_tolerance));
        }
        Ok(())
    }

    /// Zero threshold for a matrix whose largest relevant magnitude is `scale`.
    pub fn threshold(&self, scale: f64) -> f64 {
        if self.relative_tolerance {
            self.pivot_tolerance * scale
        } else {
            self.pivot_tolerance
        }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: Self::DEFAULT_PIVOT_TOLERANCE,
            relative_tolerance: true,
        }
    }
}
