use crate::core::models::domain::DomainHit;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns up to and including the analysis date are always present.
pub const MIN_FIELDS: usize = 11;
/// InterPro id, InterPro description, GO terms and pathway may be omitted.
pub const MAX_FIELDS: usize = 15;

#[derive(Debug, Error)]
pub enum InterproError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TSV error for '{path}': {source}")]
    Tsv { path: String, source: csv::Error },
    #[error("Parse error in '{path}' on line {line}: {kind}")]
    Parse {
        path: String,
        line: u64,
        kind: InterproParseErrorKind,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterproParseErrorKind {
    #[error("Invalid integer in column '{column}' (value: '{value}')")]
    InvalidInt { column: &'static str, value: String },
    #[error("Expected 11 to 15 tab-separated fields, found {found}")]
    FieldCount { found: usize },
}

/// `<dir>/filtered.<protein>_all_seqs.aa.tsv`
pub fn annotation_path(dir: &Path, protein: &str) -> PathBuf {
    dir.join(format!("filtered.{protein}_all_seqs.aa.tsv"))
}

pub fn read_hits(path: &Path) -> Result<Vec<DomainHit>, InterproError> {
    let file = File::open(path).map_err(|e| InterproError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    read_hits_from(file, &path.to_string_lossy())
}

/// Parses headerless InterProScan TSV content. `label` names the source in errors.
pub fn read_hits_from(reader: impl Read, label: &str) -> Result<Vec<DomainHit>, InterproError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut hits = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| InterproError::Tsv {
            path: label.to_string(),
            source: e,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let hit = parse_hit(&record).map_err(|kind| InterproError::Parse {
            path: label.to_string(),
            line,
            kind,
        })?;
        hits.push(hit);
    }
    Ok(hits)
}

fn parse_hit(record: &StringRecord) -> Result<DomainHit, InterproParseErrorKind> {
    if !(MIN_FIELDS..=MAX_FIELDS).contains(&record.len()) {
        return Err(InterproParseErrorKind::FieldCount {
            found: record.len(),
        });
    }

    let text = |idx: usize| record.get(idx).unwrap_or("").to_string();
    let optional = |idx: usize| record.get(idx).map(str::to_string);
    let int = |idx: usize, column: &'static str| -> Result<i64, InterproParseErrorKind> {
        let raw = record.get(idx).unwrap_or("").trim();
        raw.parse().map_err(|_| InterproParseErrorKind::InvalidInt {
            column,
            value: raw.to_string(),
        })
    };

    Ok(DomainHit {
        seq_id: text(0),
        md5: text(1),
        length: int(2, "length")?,
        source: text(3),
        accession: text(4),
        description: text(5),
        start: int(6, "start")?,
        end: int(7, "end")?,
        score: text(8),
        status: text(9),
        date: text(10),
        interpro_id: optional(11),
        interpro_description: optional(12),
        go_terms: optional(13),
        pathway: optional(14),
    })
}
