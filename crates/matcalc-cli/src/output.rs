//! Response envelope and writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use matcalc_kernel::{KernelError, Matrix, OperationResult};

/// Failure kind for payloads that never reached the kernel.
pub const INVALID_REQUEST: &str = "invalid_request";

/// `{"result": ...}` on success, `{"error": ..., "kind": ...}` on failure.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Success { result: OperationResult },
    Failure { error: String, kind: String },
}

impl Response {
    pub fn from_result(result: Result<OperationResult, KernelError>) -> Self {
        match result {
            Ok(result) => Response::Success { result },
            Err(e) => Response::Failure {
                error: e.to_string(),
                kind: e.kind().to_string(),
            },
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Response::Failure {
            error: message.into(),
            kind: INVALID_REQUEST.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }
}

/// Either one envelope or an array of them, mirroring the request file.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ResponseSet {
    Single(Response),
    Batch(Vec<Response>),
}

impl ResponseSet {
    pub fn all_succeeded(&self) -> bool {
        match self {
            ResponseSet::Single(r) => r.is_success(),
            ResponseSet::Batch(rs) => rs.iter().all(Response::is_success),
        }
    }
}

/// Write `value` as pretty JSON to `output`, or to stdout when `None`.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode response")?;
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "{}", json)?;
            writer.flush()?;
            log::info!("[matcalc] Wrote response to {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Write a matrix as headerless CSV, or TSV for a `.tsv` path.
pub fn write_matrix_csv<P: AsRef<Path>>(matrix: &Matrix, output_path: P) -> Result<()> {
    let path = output_path.as_ref();
    let delimiter = match path.extension().and_then(|ext| ext.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create output file: {:?}", path))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    for row in 0..matrix.nrows() {
        writer.write_record(matrix.row_slice(row).iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    log::info!("[matcalc] Wrote {}x{} matrix to {:?}", matrix.nrows(), matrix.ncols(), path);
    Ok(())
}

/// Write a single response. Matrix results go to CSV/TSV when the output
/// path asks for it; everything else is written as JSON.
pub fn write_response(response: &Response, output: Option<&Path>) -> Result<()> {
    let delimited = output
        .and_then(|p| p.extension())
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext == "csv" || ext == "tsv");

    match (response, output) {
        (
            Response::Success {
                result: OperationResult::Matrix(matrix),
            },
            Some(path),
        ) if delimited => write_matrix_csv(matrix, path),
        _ => write_json(response, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelopes_match_api_shape() {
        let ok = Response::from_result(Ok(OperationResult::Scalar(-2.0)));
        assert_eq!(serde_json::to_value(&ok).unwrap(), serde_json::json!({"result": -2.0}));

        let err = Response::from_result(Err(KernelError::SingularMatrix { rank: 1, size: 2 }));
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["kind"], "singular_matrix");
        assert!(value["error"].as_str().unwrap().contains("singular"));
        assert!(!err.is_success());
    }

    #[test]
    fn csv_output_for_matrix_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let m = Matrix::from_rows(vec![vec![0.5, 0.0], vec![0.0, 0.5]]).unwrap();
        let response = Response::Success {
            result: OperationResult::Matrix(m),
        };
        write_response(&response, Some(&path)).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "0.5,0\n0,0.5\n");
    }
}
