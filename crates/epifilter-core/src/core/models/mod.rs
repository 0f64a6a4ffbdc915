//! # Core Models Module
//!
//! - [`epitope`] - Per-residue prediction rows and the concatenated table for a protein
//! - [`domain`] - InterProScan domain hits and the per-sequence boundaries derived from them

pub mod domain;
pub mod epitope;
