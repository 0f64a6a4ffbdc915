use std::collections::HashMap;

pub const PDB_COLUMN: &str = "pdb";
pub const EPITOPE_COLUMN: &str = "epitope";
pub const CONFIDENCE_COLUMN: &str = "pLDDTs";
pub const RSA_COLUMN: &str = "rsa";
pub const RES_ID_COLUMN: &str = "res_id";

pub const SOURCE_FILE_COLUMN: &str = "source_file";
pub const PROTEIN_COLUMN: &str = "protein";
pub const PDB_TRIMMED_COLUMN: &str = "pdb_trimmed";

/// Columns appended by the loader, in output order.
pub const TAG_COLUMNS: [&str; 3] = [SOURCE_FILE_COLUMN, PROTEIN_COLUMN, PDB_TRIMMED_COLUMN];

const N_TERMINUS_MARKER: &str = "_Nterminus";

/// A single per-residue prediction row from a DiscoTope output file.
///
/// The raw cells are kept verbatim so that the filtered output reproduces the
/// input text exactly. The three tag columns are stored as typed fields and
/// take precedence over any input column of the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct EpitopeRecord {
    pub source_file: String,
    pub protein: String,
    pub pdb_trimmed: String,
    cells: HashMap<String, String>,
}

impl EpitopeRecord {
    pub fn new(
        source_file: impl Into<String>,
        protein: impl Into<String>,
        cells: HashMap<String, String>,
    ) -> Self {
        let pdb_trimmed = cells
            .get(PDB_COLUMN)
            .map(|pdb| trim_structure_name(pdb).to_string())
            .unwrap_or_default();
        Self {
            source_file: source_file.into(),
            protein: protein.into(),
            pdb_trimmed,
            cells,
        }
    }

    /// Returns the cell for `column`, or `None` if this row's file lacked it.
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            SOURCE_FILE_COLUMN => Some(&self.source_file),
            PROTEIN_COLUMN => Some(&self.protein),
            PDB_TRIMMED_COLUMN => Some(&self.pdb_trimmed),
            _ => self.cells.get(column).map(String::as_str),
        }
    }

    pub fn pdb(&self) -> Option<&str> {
        self.get(PDB_COLUMN)
    }

    /// The sequence identifier used to look up domain boundaries: the trimmed
    /// structure name up to the first `_Nterminus` marker.
    pub fn sequence_id(&self) -> &str {
        self.pdb_trimmed
            .split(N_TERMINUS_MARKER)
            .next()
            .unwrap_or(&self.pdb_trimmed)
    }

    pub fn is_epitope(&self) -> bool {
        self.get(EPITOPE_COLUMN).is_some_and(parse_flag)
    }

    /// Residue position; integral floats such as `40.0` are accepted.
    pub fn res_id(&self) -> Option<i64> {
        let raw = self.get(RES_ID_COLUMN)?.trim();
        raw.parse::<i64>().ok().or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && v.fract() == 0.0)
                .map(|v| v as i64)
        })
    }
}

/// Structure name with any version suffix removed (`S1.2.pdb` -> `S1`).
pub fn trim_structure_name(pdb: &str) -> &str {
    pdb.split('.').next().unwrap_or(pdb)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "True" | "true" | "TRUE" | "1" | "1.0")
}

/// The concatenated DiscoTope predictions for one protein.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpitopeTable {
    columns: Vec<String>,
    records: Vec<EpitopeRecord>,
}

impl EpitopeTable {
    /// Builds a table from per-file headers, keeping the union of input
    /// columns in first-seen order followed by the tag columns.
    pub fn from_parts<'a>(
        headers: impl IntoIterator<Item = &'a [String]>,
        records: Vec<EpitopeRecord>,
    ) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for header in headers {
            for column in header {
                if TAG_COLUMNS.contains(&column.as_str()) || columns.contains(column) {
                    continue;
                }
                columns.push(column.clone());
            }
        }
        columns.extend(TAG_COLUMNS.iter().map(|c| c.to_string()));
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn records(&self) -> &[EpitopeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A new table with this table's schema and the given records.
    pub fn with_records(&self, records: Vec<EpitopeRecord>) -> Self {
        Self {
            columns: self.columns.clone(),
            records,
        }
    }

    /// Row cells in column order, with empty strings for missing cells.
    pub fn row_values<'a>(&'a self, record: &'a EpitopeRecord) -> impl Iterator<Item = &'a str> {
        self.columns
            .iter()
            .map(move |column| record.get(column).unwrap_or(""))
    }
}
