//! Validated dense containers used by every kernel operation.
//!
//! Provides `Matrix` (row-major, rectangular) and `Vector`. Both reject
//! empty shapes and non-finite entries at construction, so the rest of the
//! kernel can assume well-formed input.
pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
