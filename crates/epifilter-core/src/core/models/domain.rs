use std::collections::HashMap;

/// One row of an InterProScan TSV annotation file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainHit {
    pub seq_id: String,
    pub md5: String,
    pub length: i64,
    pub source: String,
    pub accession: String,
    pub description: String,
    pub start: i64,
    pub end: i64,
    pub score: String,
    pub status: String,
    pub date: String,
    pub interpro_id: Option<String>,
    pub interpro_description: Option<String>,
    pub go_terms: Option<String>,
    pub pathway: Option<String>,
}

/// The role a domain accession plays when deriving exclusion boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainCategory {
    NTerminal,
    CTerminal,
    Anchor,
}

/// Per-sequence cut points derived from its domain hits.
///
/// `n_term_end` is the largest end among N-terminal hits, `c_term_start` the
/// smallest start among C-terminal hits, and `lpxtg_pos` the end of the last
/// anchor-motif hit seen in file order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainBoundaries {
    pub n_term_end: Option<i64>,
    pub c_term_start: Option<i64>,
    pub lpxtg_pos: Option<i64>,
}

impl DomainBoundaries {
    pub const NONE: Self = Self {
        n_term_end: None,
        c_term_start: None,
        lpxtg_pos: None,
    };

    // A zero position never marks a real residue and is treated as unset.

    pub fn n_term_cutoff(&self) -> Option<i64> {
        self.n_term_end.filter(|&pos| pos != 0)
    }

    pub fn c_term_cutoff(&self) -> Option<i64> {
        self.c_term_start.filter(|&pos| pos != 0)
    }

    pub fn anchor_cutoff(&self) -> Option<i64> {
        self.lpxtg_pos.filter(|&pos| pos != 0)
    }
}

pub type BoundaryMap = HashMap<String, DomainBoundaries>;
