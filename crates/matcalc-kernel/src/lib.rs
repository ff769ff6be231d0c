//! matcalc-kernel: numerical core of the matrix calculator.
//!
//! This crate provides validated `Matrix`/`Vector` containers, a single
//! partial-pivoting elimination routine, and the operations built on it
//! (determinant, rank, inverse, linear system solving) alongside the plain
//! element-wise and structural operations.
//!
//! Operations are pure: they never modify their inputs and keep no state
//! between calls, so a [`Kernel`] can be shared freely across threads.
pub mod config;
pub mod elimination;
pub mod error;
pub mod kernel;
pub mod linalg;
pub mod math;
pub mod operation;
pub mod ops;

pub use config::KernelConfig;
pub use error::{ErrorKind, KernelError};
pub use kernel::Kernel;
pub use linalg::SolutionSet;
pub use math::{Matrix, Vector};
pub use operation::{Operation, OperationKind, OperationResult};
