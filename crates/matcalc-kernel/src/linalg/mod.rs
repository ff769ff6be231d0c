//! Elimination-based operations.
//!
//! Each entry point validates shape, runs [`crate::elimination::eliminate`]
//! once and turns the resulting pivot plan into a value or a typed failure.
pub mod determinant;
pub mod inverse;
pub mod rank;
pub mod solve;

pub use determinant::determinant;
pub use inverse::inverse;
pub use rank::rank;
pub use solve::{solve, SolutionSet};
