use super::config::DomainSets;
use super::error::EngineError;
use crate::core::io::interpro;
use crate::core::models::domain::{BoundaryMap, DomainBoundaries, DomainCategory, DomainHit};
use std::path::Path;
use tracing::{debug, trace};

/// Reduces domain hits to one boundary summary per sequence id.
///
/// Every sequence id present in `hits` gets an entry, even if none of its
/// hits fall into a known category.
pub fn summarize(hits: &[DomainHit], domains: &DomainSets) -> BoundaryMap {
    let mut map = BoundaryMap::new();
    for hit in hits {
        let bounds = map.entry(hit.seq_id.clone()).or_default();
        if let Some(category) = domains.classify(&hit.accession) {
            trace!(
                "{}: {:?} hit {} at {}..{}",
                hit.seq_id, category, hit.accession, hit.start, hit.end
            );
            absorb(bounds, hit, category);
        }
    }
    map
}

fn absorb(bounds: &mut DomainBoundaries, hit: &DomainHit, category: DomainCategory) {
    match category {
        DomainCategory::NTerminal => {
            let current = bounds.n_term_cutoff().unwrap_or(0);
            bounds.n_term_end = Some(current.max(hit.end));
        }
        DomainCategory::CTerminal => {
            let current = bounds.c_term_cutoff().unwrap_or(hit.length);
            bounds.c_term_start = Some(current.min(hit.start));
        }
        DomainCategory::Anchor => {
            bounds.lpxtg_pos = Some(hit.end);
        }
    }
}

/// Reads an annotation file and summarizes its boundaries.
pub fn load_boundaries(path: &Path, domains: &DomainSets) -> Result<BoundaryMap, EngineError> {
    let hits = interpro::read_hits(path)?;
    let map = summarize(&hits, domains);
    debug!(
        "Parsed {} domain hit(s) covering {} sequence(s) from {:?}",
        hits.len(),
        map.len(),
        path
    );
    Ok(map)
}
