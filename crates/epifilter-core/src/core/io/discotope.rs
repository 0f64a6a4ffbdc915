use crate::core::models::epitope::{EpitopeRecord, EpitopeTable, PDB_COLUMN};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

const OUTPUT_DIR_SUFFIX: &str = "_Discotope_output";

#[derive(Debug, Error)]
pub enum DiscotopeError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Required column '{column}' is missing from '{path}'")]
    MissingColumn { path: String, column: &'static str },
}

fn display(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// `<base>/<protein>_Discotope_output`
pub fn prediction_dir(base: &Path, protein: &str) -> PathBuf {
    base.join(format!("{protein}{OUTPUT_DIR_SUFFIX}"))
}

/// Lists the `*.csv` files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>, DiscotopeError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| DiscotopeError::Io {
        path: display(dir),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| DiscotopeError::Io {
                path: display(dir),
                source: e,
            })?
            .path();
        let is_hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if path.is_file() && !is_hidden && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Loads and concatenates every prediction CSV for `protein`.
///
/// Returns `Ok(None)` when no CSV files exist for the protein.
pub fn load_protein(base: &Path, protein: &str) -> Result<Option<EpitopeTable>, DiscotopeError> {
    let dir = prediction_dir(base, protein);
    let files = discover_csv_files(&dir)?;
    if files.is_empty() {
        debug!("No prediction CSVs under {:?}", dir);
        return Ok(None);
    }

    let mut headers = Vec::with_capacity(files.len());
    let mut records = Vec::new();
    for path in &files {
        let (header, rows) = read_prediction_file(path)?;
        let source_file = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        trace!("Read {} rows from {}", rows.len(), source_file);
        records.extend(
            rows.into_iter()
                .map(|cells| EpitopeRecord::new(source_file.clone(), protein, cells)),
        );
        headers.push(header);
    }

    debug!(
        "Loaded {} rows for {} from {} file(s)",
        records.len(),
        protein,
        files.len()
    );
    Ok(Some(EpitopeTable::from_parts(
        headers.iter().map(Vec::as_slice),
        records,
    )))
}

fn read_prediction_file(
    path: &Path,
) -> Result<(Vec<String>, Vec<HashMap<String, String>>), DiscotopeError> {
    let csv_err = |e: csv::Error| DiscotopeError::Csv {
        path: display(path),
        source: e,
    };
    let file = fs::File::open(path).map_err(|e| DiscotopeError::Io {
        path: display(path),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let header: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    if !header.iter().any(|c| c == PDB_COLUMN) {
        return Err(DiscotopeError::MissingColumn {
            path: display(path),
            column: PDB_COLUMN,
        });
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<HashMap<String, String>>() {
        rows.push(result.map_err(csv_err)?);
    }
    Ok((header, rows))
}

/// Writes `table` as a comma-separated file with a header row.
pub fn write_table(table: &EpitopeTable, path: &Path) -> Result<(), DiscotopeError> {
    let csv_err = |e: csv::Error| DiscotopeError::Csv {
        path: display(path),
        source: e,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(table.columns()).map_err(csv_err)?;
    for record in table.records() {
        writer
            .write_record(table.row_values(record))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|e| DiscotopeError::Io {
        path: display(path),
        source: e,
    })
}
