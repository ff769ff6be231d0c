//! Matrix and vector file readers.
//!
//! Matrices are read from CSV/TSV (no header, one matrix row per line) or
//! JSON nested arrays; the format is chosen by file extension. Decoded values
//! go through the kernel's validated constructors, so ragged rows, empty
//! input and non-finite entries are rejected here before any operation runs.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};

use matcalc_kernel::{Matrix, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Delimited(u8),
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(InputFormat::Json),
            Some("csv") => Ok(InputFormat::Delimited(b',')),
            Some("tsv") => Ok(InputFormat::Delimited(b'\t')),
            _ => anyhow::bail!(
                "File must have a .csv, .tsv or .json extension: {}",
                path.display()
            ),
        }
    }
}

/// Check the extension and existence of an input file.
pub fn validate_input_file<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path)?;
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    Ok(format)
}

fn read_rows(path: &Path) -> Result<Vec<Vec<f64>>> {
    match validate_input_file(path)? {
        InputFormat::Json => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Expected a JSON array of numeric rows in {}", path.display()))
        }
        InputFormat::Delimited(delimiter) => read_delimited_rows(path, delimiter),
    }
}

fn read_delimited_rows(path: &Path, delimiter: u8) -> Result<Vec<Vec<f64>>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record =
            record.with_context(|| format!("Failed to read row {} of {}", line + 1, path.display()))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(col, field)| {
                field.parse::<f64>().with_context(|| {
                    format!(
                        "Invalid number '{}' at row {}, column {} of {}",
                        field,
                        line + 1,
                        col + 1,
                        path.display()
                    )
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// Load and validate a matrix file.
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let path = path.as_ref();
    let rows = read_rows(path)?;
    let matrix = Matrix::from_rows(rows)
        .with_context(|| format!("Invalid matrix in {}", path.display()))?;
    log::debug!(
        "Loaded {}x{} matrix from {}",
        matrix.nrows(),
        matrix.ncols(),
        path.display()
    );
    Ok(matrix)
}

/// Load and validate a vector file.
///
/// JSON files hold a flat array. CSV/TSV files hold either a single row or a
/// single column.
pub fn load_vector<P: AsRef<Path>>(path: P) -> Result<Vector> {
    let path = path.as_ref();
    let values: Vec<f64> = match validate_input_file(path)? {
        InputFormat::Json => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Expected a JSON array of numbers in {}", path.display()))?
        }
        InputFormat::Delimited(delimiter) => {
            let mut rows = read_delimited_rows(path, delimiter)?;
            if rows.len() == 1 {
                rows.remove(0)
            } else if rows.iter().all(|r| r.len() == 1) {
                rows.into_iter().flatten().collect()
            } else {
                anyhow::bail!(
                    "Vector file must contain a single row or a single column: {}",
                    path.display()
                );
            }
        }
    };
    Vector::new(values).with_context(|| format!("Invalid vector in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.CSV")).unwrap(), InputFormat::Delimited(b','));
        assert_eq!(InputFormat::from_path(Path::new("a.json")).unwrap(), InputFormat::Json);
        assert!(InputFormat::from_path(Path::new("a.txt")).is_err());
    }

    #[test]
    fn csv_with_spaces_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "m.csv", "# a 2x2 matrix\n1, 2\n 3 ,4.5\n");
        let m = load_matrix(&path).unwrap();
        assert_eq!(m.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.5]]);
    }

    #[test]
    fn ragged_csv_is_rejected_by_matrix_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "m.csv", "1,2\n3\n");
        let err = load_matrix(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("same length"), "{:#}", err);
    }

    #[test]
    fn vector_as_column_or_row() {
        let dir = tempfile::tempdir().unwrap();
        let col = write_file(&dir, "col.csv", "1\n2\n3\n");
        let row = write_file(&dir, "row.tsv", "1\t2\t3\n");
        assert_eq!(load_vector(&col).unwrap().to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(load_vector(&row).unwrap().to_vec(), vec![1.0, 2.0, 3.0]);

        let grid = write_file(&dir, "grid.csv", "1,2\n3,4\n");
        assert!(load_vector(&grid).is_err());
    }
}
