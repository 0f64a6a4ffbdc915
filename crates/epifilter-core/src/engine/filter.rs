use super::config::Thresholds;
use super::error::EngineError;
use crate::core::models::domain::{BoundaryMap, DomainBoundaries};
use crate::core::models::epitope::{
    CONFIDENCE_COLUMN, EPITOPE_COLUMN, EpitopeRecord, EpitopeTable, RES_ID_COLUMN, RSA_COLUMN,
};
use tracing::{debug, trace};

/// Outcome of the per-row boundary check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    InvalidResidue,
    NTerminal,
    CTerminal,
    Anchor,
}

/// Protein families whose anchor-motif cutoff points in opposite directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorSide {
    /// Residues before the anchor are excluded.
    Zmp,
    /// Residues at or after the anchor are excluded.
    Psp,
    Unaffected,
}

impl AnchorSide {
    fn of(protein: &str) -> Self {
        if protein.starts_with("zmp") {
            Self::Zmp
        } else if protein.starts_with("psp") {
            Self::Psp
        } else {
            Self::Unaffected
        }
    }

    fn excludes(self, res_id: i64, anchor: i64) -> bool {
        match self {
            Self::Zmp => res_id < anchor,
            Self::Psp => res_id >= anchor,
            Self::Unaffected => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub total: usize,
    pub high_confidence: usize,
    pub invalid_residue: usize,
    pub excluded_n_terminal: usize,
    pub excluded_c_terminal: usize,
    pub excluded_anchor: usize,
    pub kept: usize,
}

impl FilterStats {
    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Keep => self.kept += 1,
            Verdict::InvalidResidue => self.invalid_residue += 1,
            Verdict::NTerminal => self.excluded_n_terminal += 1,
            Verdict::CTerminal => self.excluded_c_terminal += 1,
            Verdict::Anchor => self.excluded_anchor += 1,
        }
    }
}

pub fn classify_row(record: &EpitopeRecord, boundaries: &BoundaryMap) -> Verdict {
    let Some(res_id) = record.res_id() else {
        return Verdict::InvalidResidue;
    };
    let bounds = boundaries
        .get(record.sequence_id())
        .unwrap_or(&DomainBoundaries::NONE);

    if bounds.n_term_cutoff().is_some_and(|end| res_id <= end) {
        return Verdict::NTerminal;
    }
    if bounds.c_term_cutoff().is_some_and(|start| res_id >= start) {
        return Verdict::CTerminal;
    }
    if let Some(anchor) = bounds.anchor_cutoff() {
        if AnchorSide::of(&record.protein).excludes(res_id, anchor) {
            return Verdict::Anchor;
        }
    }
    Verdict::Keep
}

/// Whether a row survives the domain-boundary rules.
pub fn keep_row(record: &EpitopeRecord, boundaries: &BoundaryMap) -> bool {
    classify_row(record, boundaries) == Verdict::Keep
}

/// Cell texts read as missing values, matching the pandas `read_csv` defaults.
const MISSING_VALUE_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing_value(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("nan") || MISSING_VALUE_TOKENS.contains(&raw)
}

fn numeric_cell(
    record: &EpitopeRecord,
    column: &'static str,
) -> Result<Option<f64>, EngineError> {
    let raw = record.get(column).map(str::trim).unwrap_or("");
    if is_missing_value(raw) {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| EngineError::InvalidValue {
            column,
            value: raw.to_string(),
            file: record.source_file.clone(),
        })
}

/// Epitope flag set and all enabled thresholds strictly exceeded.
pub fn is_high_confidence(
    record: &EpitopeRecord,
    thresholds: &Thresholds,
) -> Result<bool, EngineError> {
    if !record.is_epitope() {
        return Ok(false);
    }
    let confident = numeric_cell(record, CONFIDENCE_COLUMN)?
        .is_some_and(|score| score > thresholds.min_confidence);
    if !confident {
        return Ok(false);
    }
    match thresholds.min_rsa {
        Some(min_rsa) => Ok(numeric_cell(record, RSA_COLUMN)?.is_some_and(|rsa| rsa > min_rsa)),
        None => Ok(true),
    }
}

fn require_column(table: &EpitopeTable, column: &'static str) -> Result<(), EngineError> {
    if table.has_column(column) {
        return Ok(());
    }
    let protein = table
        .records()
        .first()
        .map(|r| r.protein.clone())
        .unwrap_or_default();
    Err(EngineError::MissingColumn { protein, column })
}

/// Keeps high-confidence epitope rows that fall outside every excluded
/// domain region, preserving order and schema.
pub fn filter_epitopes(
    table: &EpitopeTable,
    boundaries: &BoundaryMap,
    thresholds: &Thresholds,
) -> Result<(EpitopeTable, FilterStats), EngineError> {
    require_column(table, EPITOPE_COLUMN)?;
    require_column(table, CONFIDENCE_COLUMN)?;
    require_column(table, RES_ID_COLUMN)?;
    if thresholds.min_rsa.is_some() {
        require_column(table, RSA_COLUMN)?;
    }

    let mut stats = FilterStats {
        total: table.len(),
        ..Default::default()
    };
    let mut kept = Vec::new();
    for record in table.records() {
        if !is_high_confidence(record, thresholds)? {
            continue;
        }
        stats.high_confidence += 1;

        let verdict = classify_row(record, boundaries);
        trace!(
            "{} res {:?}: {:?}",
            record.sequence_id(),
            record.get(RES_ID_COLUMN),
            verdict
        );
        stats.record(verdict);
        if verdict == Verdict::Keep {
            kept.push(record.clone());
        }
    }

    debug!(
        "Kept {} of {} high-confidence rows ({} total)",
        stats.kept, stats.high_confidence, stats.total
    );
    Ok((table.with_records(kept), stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(protein: &str, pdb: &str, res_id: &str, epitope: &str, score: &str) -> EpitopeRecord {
        let cells: HashMap<String, String> = [
            ("pdb", pdb),
            ("res_id", res_id),
            ("epitope", epitope),
            ("pLDDTs", score),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        EpitopeRecord::new("preds.csv", protein, cells)
    }

    fn table(records: Vec<EpitopeRecord>) -> EpitopeTable {
        let header: Vec<String> = ["pdb", "res_id", "epitope", "pLDDTs"]
            .map(String::from)
            .to_vec();
        EpitopeTable::from_parts([header.as_slice()], records)
    }

    fn bounds(seq: &str, n: Option<i64>, c: Option<i64>, lpxtg: Option<i64>) -> BoundaryMap {
        BoundaryMap::from([(
            seq.to_string(),
            DomainBoundaries {
                n_term_end: n,
                c_term_start: c,
                lpxtg_pos: lpxtg,
            },
        )])
    }

    fn kept_res_ids(table: &EpitopeTable) -> Vec<i64> {
        table.records().iter().filter_map(|r| r.res_id()).collect()
    }

    #[test]
    fn n_terminal_region_is_excluded_inclusively() {
        let map = bounds("S1", Some(50), None, None);
        let input = table(vec![
            row("pspA", "S1.pdb", "40", "True", "1"),
            row("pspA", "S1.pdb", "50", "True", "1"),
            row("pspA", "S1.pdb", "60", "True", "1"),
        ]);
        let (out, stats) = filter_epitopes(&input, &map, &Thresholds::default()).unwrap();
        assert_eq!(kept_res_ids(&out), [60]);
        assert_eq!(stats.excluded_n_terminal, 2);
        assert_eq!(stats.kept, 1);
    }

    #[test]
    fn c_terminal_region_is_excluded_inclusively() {
        let map = bounds("S1", None, Some(250), None);
        assert!(keep_row(&row("pspC", "S1.pdb", "249", "True", "1"), &map));
        assert!(!keep_row(&row("pspC", "S1.pdb", "250", "True", "1"), &map));
        assert_eq!(
            classify_row(&row("pspC", "S1.pdb", "300", "True", "1"), &map),
            Verdict::CTerminal
        );
    }

    #[test]
    fn zmp_proteins_drop_residues_before_anchor() {
        let map = bounds("S1", None, None, Some(200));
        assert!(!keep_row(&row("zmpB", "S1.pdb", "199", "True", "1"), &map));
        assert!(keep_row(&row("zmpB", "S1.pdb", "200", "True", "1"), &map));
    }

    #[test]
    fn psp_proteins_drop_residues_from_anchor_on() {
        let map = bounds("S1", None, None, Some(200));
        assert!(keep_row(&row("pspA", "S1.pdb", "199", "True", "1"), &map));
        assert!(!keep_row(&row("pspA", "S1.pdb", "200", "True", "1"), &map));
    }

    #[test]
    fn other_families_ignore_anchor() {
        let map = bounds("S1", None, None, Some(200));
        assert!(keep_row(&row("cbpA", "S1.pdb", "1", "True", "1"), &map));
        assert!(keep_row(&row("cbpA", "S1.pdb", "500", "True", "1"), &map));
    }

    #[test]
    fn zero_boundaries_do_not_exclude() {
        let map = bounds("S1", Some(0), Some(0), Some(0));
        assert!(keep_row(&row("zmpA", "S1.pdb", "0", "True", "1"), &map));
    }

    #[test]
    fn unannotated_sequences_keep_everything() {
        let map = bounds("OTHER", Some(1000), None, None);
        let input = table(vec![
            row("zmpA", "S9.pdb", "1", "True", "5"),
            row("zmpA", "S9.pdb", "999", "True", "5"),
        ]);
        let (out, _) = filter_epitopes(&input, &map, &Thresholds::default()).unwrap();
        assert_eq!(kept_res_ids(&out), [1, 999]);
    }

    #[test]
    fn n_terminus_structures_use_parent_sequence_boundaries() {
        let map = bounds("S1", Some(50), None, None);
        assert!(!keep_row(&row("pspA", "S1_Nterminus.pdb", "10", "True", "1"), &map));
    }

    #[test]
    fn unparseable_res_id_is_dropped_silently() {
        let input = table(vec![
            row("pspA", "S1.pdb", "12A", "True", "1"),
            row("pspA", "S1.pdb", "13", "True", "1"),
        ]);
        let (out, stats) =
            filter_epitopes(&input, &BoundaryMap::new(), &Thresholds::default()).unwrap();
        assert_eq!(kept_res_ids(&out), [13]);
        assert_eq!(stats.invalid_residue, 1);
    }

    #[test]
    fn non_epitopes_and_non_positive_scores_are_prefiltered() {
        let input = table(vec![
            row("pspA", "S1.pdb", "1", "False", "90"),
            row("pspA", "S1.pdb", "2", "True", "0"),
            row("pspA", "S1.pdb", "3", "True", "-1"),
            row("pspA", "S1.pdb", "4", "True", ""),
            row("pspA", "S1.pdb", "5", "True", "0.01"),
        ]);
        let (out, stats) =
            filter_epitopes(&input, &BoundaryMap::new(), &Thresholds::default()).unwrap();
        assert_eq!(kept_res_ids(&out), [5]);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.high_confidence, 1);
    }

    #[test]
    fn confidence_threshold_is_strict() {
        let thresholds = Thresholds {
            min_confidence: 50.0,
            min_rsa: None,
        };
        let input = table(vec![
            row("pspA", "S1.pdb", "1", "True", "50"),
            row("pspA", "S1.pdb", "2", "True", "50.5"),
        ]);
        let (out, _) = filter_epitopes(&input, &BoundaryMap::new(), &thresholds).unwrap();
        assert_eq!(kept_res_ids(&out), [2]);
    }

    #[test]
    fn rsa_threshold_requires_rsa_column() {
        let thresholds = Thresholds {
            min_confidence: 0.0,
            min_rsa: Some(0.5),
        };
        let input = table(vec![row("pspA", "S1.pdb", "1", "True", "80")]);
        let result = filter_epitopes(&input, &BoundaryMap::new(), &thresholds);
        assert!(matches!(
            result,
            Err(EngineError::MissingColumn { column: "rsa", .. })
        ));
    }

    #[test]
    fn rsa_threshold_filters_rows() {
        let thresholds = Thresholds {
            min_confidence: 0.0,
            min_rsa: Some(0.5),
        };
        let header: Vec<String> = ["pdb", "res_id", "epitope", "pLDDTs", "rsa"]
            .map(String::from)
            .to_vec();
        let with_rsa = |res_id: &str, rsa: &str| {
            let cells: HashMap<String, String> = [
                ("pdb", "S1.pdb"),
                ("res_id", res_id),
                ("epitope", "True"),
                ("pLDDTs", "80"),
                ("rsa", rsa),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
            EpitopeRecord::new("preds.csv", "pspA", cells)
        };
        let input = EpitopeTable::from_parts(
            [header.as_slice()],
            vec![with_rsa("1", "0.7"), with_rsa("2", "0.5"), with_rsa("3", "")],
        );
        let (out, _) = filter_epitopes(&input, &BoundaryMap::new(), &thresholds).unwrap();
        assert_eq!(kept_res_ids(&out), [1]);
    }

    #[test]
    fn missing_confidence_column_is_fatal() {
        let header: Vec<String> = ["pdb", "res_id", "epitope"].map(String::from).to_vec();
        let input = EpitopeTable::from_parts(
            [header.as_slice()],
            vec![row("zmpA", "S1.pdb", "1", "True", "1")],
        );
        let result = filter_epitopes(&input, &BoundaryMap::new(), &Thresholds::default());
        assert!(matches!(
            result,
            Err(EngineError::MissingColumn { column: "pLDDTs", ref protein }) if protein == "zmpA"
        ));
    }

    #[test]
    fn missing_res_id_column_is_fatal() {
        let header: Vec<String> = ["pdb", "epitope", "pLDDTs"].map(String::from).to_vec();
        let cells = [("pdb", "S1.pdb"), ("epitope", "True"), ("pLDDTs", "90")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let input = EpitopeTable::from_parts(
            [header.as_slice()],
            vec![EpitopeRecord::new("a.csv", "pspA", cells)],
        );
        let result = filter_epitopes(&input, &BoundaryMap::new(), &Thresholds::default());
        assert!(matches!(
            result,
            Err(EngineError::MissingColumn { column: "res_id", ref protein }) if protein == "pspA"
        ));
    }

    #[test]
    fn missing_value_tokens_never_pass_threshold() {
        let input = table(vec![
            row("pspA", "S1.pdb", "1", "True", "NA"),
            row("pspA", "S1.pdb", "2", "True", "N/A"),
            row("pspA", "S1.pdb", "3", "True", "NULL"),
            row("pspA", "S1.pdb", "4", "True", "None"),
            row("pspA", "S1.pdb", "5", "True", "<NA>"),
            row("pspA", "S1.pdb", "6", "True", "NaN"),
            row("pspA", "S1.pdb", "7", "True", "55"),
        ]);
        let (out, stats) =
            filter_epitopes(&input, &BoundaryMap::new(), &Thresholds::default()).unwrap();
        assert_eq!(kept_res_ids(&out), [7]);
        assert_eq!(stats.high_confidence, 1);
    }

    #[test]
    fn non_numeric_confidence_is_fatal() {
        let input = table(vec![row("zmpA", "S1.pdb", "1", "True", "high")]);
        let result = filter_epitopes(&input, &BoundaryMap::new(), &Thresholds::default());
        assert!(matches!(result, Err(EngineError::InvalidValue { .. })));
    }

    #[test]
    fn output_keeps_schema_and_order() {
        let map = bounds("S1", Some(5), None, None);
        let input = table(vec![
            row("pspA", "S1.pdb", "30", "True", "1"),
            row("pspA", "S1.pdb", "3", "True", "1"),
            row("pspA", "S1.pdb", "10", "True", "1"),
        ]);
        let (out, _) = filter_epitopes(&input, &map, &Thresholds::default()).unwrap();
        assert_eq!(out.columns(), input.columns());
        assert_eq!(kept_res_ids(&out), [30, 10]);
    }
}
