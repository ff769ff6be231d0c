//! Explicit operation requests and their results.
//!
//! An [`Operation`] carries its own operands, so a caller picks the
//! operation and supplies everything it needs in one value. The serde
//! representation is tagged by `"operation"` and uses the payload field
//! names of the calculator API (`matrix`, `matrix_a`/`matrix_b`,
//! `coefficients`/`constants`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::linalg::SolutionSet;
use crate::math::{Matrix, Vector};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Operation {
    Determinant { matrix: Matrix },
    Inverse { matrix: Matrix },
    Rank { matrix: Matrix },
    Transpose { matrix: Matrix },
    Add { matrix_a: Matrix, matrix_b: Matrix },
    Subtract { matrix_a: Matrix, matrix_b: Matrix },
    Multiply { matrix_a: Matrix, matrix_b: Matrix },
    ScalarMultiply { matrix: Matrix, scalar: f64 },
    Solve { coefficients: Matrix, constants: Vector },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Determinant { .. } => OperationKind::Determinant,
            Operation::Inverse { .. } => OperationKind::Inverse,
            Operation::Rank { .. } => OperationKind::Rank,
            Operation::Transpose { .. } => OperationKind::Transpose,
            Operation::Add { .. } => OperationKind::Add,
            Operation::Subtract { .. } => OperationKind::Subtract,
            Operation::Multiply { .. } => OperationKind::Multiply,
            Operation::ScalarMultiply { .. } => OperationKind::ScalarMultiply,
            Operation::Solve { .. } => OperationKind::Solve,
        }
    }
}

/// Operation name without operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Determinant,
    Inverse,
    Rank,
    Transpose,
    Add,
    Subtract,
    Multiply,
    ScalarMultiply,
    Solve,
}

impl OperationKind {
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Determinant => "determinant",
            OperationKind::Inverse => "inverse",
            OperationKind::Rank => "rank",
            OperationKind::Transpose => "transpose",
            OperationKind::Add => "add",
            OperationKind::Subtract => "subtract",
            OperationKind::Multiply => "multiply",
            OperationKind::ScalarMultiply => "scalar_multiply",
            OperationKind::Solve => "solve",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "determinant" | "det" => Ok(OperationKind::Determinant),
            "inverse" => Ok(OperationKind::Inverse),
            "rank" => Ok(OperationKind::Rank),
            "transpose" => Ok(OperationKind::Transpose),
            "add" | "addition" => Ok(OperationKind::Add),
            "subtract" | "subtraction" => Ok(OperationKind::Subtract),
            "multiply" | "multiplication" => Ok(OperationKind::Multiply),
            "scale" | "scalar_multiply" | "scalar_multiplication" => {
                Ok(OperationKind::ScalarMultiply)
            }
            "solve" | "sle" => Ok(OperationKind::Solve),
            _ => Err(format!("Unknown operation: {}", s)),
        }
    }
}

/// Value produced by a successful operation.
///
/// Serialises untagged: a number, nested rows, a flat array, an integer, or
/// a status-tagged solution object.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OperationResult {
    Scalar(f64),
    Matrix(Matrix),
    Vector(Vector),
    Rank(usize),
    Solution(SolutionSet),
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationResult::Scalar(v) => write!(f, "{}", v),
            OperationResult::Matrix(m) => write!(f, "{}", m),
            OperationResult::Vector(v) => write!(f, "{}", v),
            OperationResult::Rank(r) => write!(f, "{}", r),
            OperationResult::Solution(SolutionSet::Unique { solution }) => {
                write!(f, "unique solution: {}", solution)
            }
            OperationResult::Solution(SolutionSet::Inconsistent) => {
                write!(f, "inconsistent system: no solution")
            }
            OperationResult::Solution(SolutionSet::Underdetermined {
                particular,
                free_variables,
            }) => write!(
                f,
                "infinitely many solutions ({} free variables), particular solution: {}",
                free_variables, particular
            ),
        }
    }
}
