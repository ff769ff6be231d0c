//! matcalc-cli: file-based boundary layer for the matcalc kernel.
//!
//! Decodes matrices, vectors and JSON operation requests from disk, runs them
//! through `matcalc_kernel::Kernel`, and encodes results as the
//! `{"result": ...}` / `{"error": ...}` response envelope.
pub mod commands;
pub mod config;
pub mod input;
pub mod output;
