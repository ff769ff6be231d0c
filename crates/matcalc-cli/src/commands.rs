//! Glue between decoded inputs and the kernel.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use matcalc_kernel::{Kernel, Operation, OperationKind};

use crate::input::{load_matrix, load_vector};
use crate::output::{Response, ResponseSet};

/// Operands given as file paths on the command line.
#[derive(Debug, Clone, Default)]
pub struct OperandFiles<'a> {
    pub matrix_a: Option<&'a Path>,
    pub matrix_b: Option<&'a Path>,
    pub vector: Option<&'a Path>,
    pub scalar: Option<f64>,
}

fn required<'a>(path: Option<&'a Path>, what: &str, kind: OperationKind) -> Result<&'a Path> {
    path.with_context(|| format!("{} requires {}", kind, what))
}

/// Build an [`Operation`] for `kind` by loading its operand files.
pub fn build_operation(kind: OperationKind, files: &OperandFiles<'_>) -> Result<Operation> {
    let operation = match kind {
        OperationKind::Determinant => Operation::Determinant {
            matrix: load_matrix(required(files.matrix_a, "a matrix file", kind)?)?,
        },
        OperationKind::Inverse => Operation::Inverse {
            matrix: load_matrix(required(files.matrix_a, "a matrix file", kind)?)?,
        },
        OperationKind::Rank => Operation::Rank {
            matrix: load_matrix(required(files.matrix_a, "a matrix file", kind)?)?,
        },
        OperationKind::Transpose => Operation::Transpose {
            matrix: load_matrix(required(files.matrix_a, "a matrix file", kind)?)?,
        },
        OperationKind::Add => Operation::Add {
            matrix_a: load_matrix(required(files.matrix_a, "two matrix files", kind)?)?,
            matrix_b: load_matrix(required(files.matrix_b, "two matrix files", kind)?)?,
        },
        OperationKind::Subtract => Operation::Subtract {
            matrix_a: load_matrix(required(files.matrix_a, "two matrix files", kind)?)?,
            matrix_b: load_matrix(required(files.matrix_b, "two matrix files", kind)?)?,
        },
        OperationKind::Multiply => Operation::Multiply {
            matrix_a: load_matrix(required(files.matrix_a, "two matrix files", kind)?)?,
            matrix_b: load_matrix(required(files.matrix_b, "two matrix files", kind)?)?,
        },
        OperationKind::ScalarMultiply => Operation::ScalarMultiply {
            matrix: load_matrix(required(files.matrix_a, "a matrix file", kind)?)?,
            scalar: files
                .scalar
                .with_context(|| format!("{} requires a scalar", kind))?,
        },
        OperationKind::Solve => Operation::Solve {
            coefficients: load_matrix(required(files.matrix_a, "a coefficient matrix file", kind)?)?,
            constants: load_vector(required(files.vector, "a constants file", kind)?)?,
        },
    };
    Ok(operation)
}

pub fn run_operation(kernel: &Kernel, operation: &Operation) -> Response {
    Response::from_result(kernel.execute(operation))
}

fn decode_operation(value: Value) -> std::result::Result<Operation, String> {
    serde_json::from_value(value).map_err(|e| format!("Invalid request: {}", e))
}

/// Execute a JSON request file holding one operation object or an array of
/// them. Malformed entries become `invalid_request` envelopes; the rest run
/// in parallel and keep their position in the output.
pub fn run_request_file<P: AsRef<Path>>(kernel: &Kernel, path: P) -> Result<ResponseSet> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file: {}", path.display()))?;
    let payload: Value = serde_json::from_str(&content)
        .with_context(|| format!("Request file is not valid JSON: {}", path.display()))?;

    match payload {
        Value::Array(values) => {
            let mut responses: Vec<Option<Response>> = Vec::with_capacity(values.len());
            let mut operations = Vec::new();
            let mut slots = Vec::new();
            for (idx, value) in values.into_iter().enumerate() {
                match decode_operation(value) {
                    Ok(operation) => {
                        operations.push(operation);
                        slots.push(idx);
                        responses.push(None);
                    }
                    Err(message) => {
                        log::warn!("[matcalc] Request {} rejected: {}", idx, message);
                        responses.push(Some(Response::invalid_request(message)));
                    }
                }
            }

            for (slot, result) in slots.into_iter().zip(kernel.execute_batch(&operations)) {
                responses[slot] = Some(Response::from_result(result));
            }
            Ok(ResponseSet::Batch(responses.into_iter().flatten().collect()))
        }
        value => {
            let response = match decode_operation(value) {
                Ok(operation) => run_operation(kernel, &operation),
                Err(message) => Response::invalid_request(message),
            };
            Ok(ResponseSet::Single(response))
        }
    }
}
