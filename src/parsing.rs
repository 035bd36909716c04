//! File parsing functionality for benchmark outcome CSVs
//!
//! Outcome files have no header row. Each line is one benchmark configuration,
//! each cell the time spent on one formula.

use crate::table::Table;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read input file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Non-numeric value {value:?} in {path} at row {row}, column {column}")]
    NotANumber {
        path: PathBuf,
        row: usize,
        column: usize,
        value: String,
    },

    #[error("No data in {0}")]
    Empty(PathBuf),
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Parse a headerless CSV file of measurements into a [`Table`]
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Returns
/// * `Ok(Table)` - Rows and columns exactly as they appear in the file
/// * `Err(ParsingError)` - If the file is missing, ragged, non-numeric, or empty
pub fn load_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|source| ParsingError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (row_index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| ParsingError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row = record
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                cell.parse::<f64>().map_err(|_| ParsingError::NotANumber {
                    path: path.to_path_buf(),
                    row: row_index,
                    column,
                    value: cell.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    // The reader already rejects records of unequal length.
    let table = match Table::from_rows(rows) {
        Some(table) if table.rows() > 0 && table.columns() > 0 => table,
        _ => return Err(ParsingError::Empty(path.to_path_buf())),
    };

    info!(
        path = %path.display(),
        rows = table.rows(),
        columns = table.columns(),
        "Loaded outcome table"
    );
    Ok(table)
}

/// Load every file in order, stopping at the first failure.
pub fn load_tables<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Table>> {
    paths.iter().map(|path| load_table(path.as_ref())).collect()
}
