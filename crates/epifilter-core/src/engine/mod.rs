//! # Engine Module
//!
//! The filtering logic applied to each protein.
//!
//! - **Configuration** ([`config`]) - Domain accession sets, thresholds and pipeline paths
//! - **Boundaries** ([`boundaries`]) - Reduction of domain hits to per-sequence cut points
//! - **Filtering** ([`filter`]) - The confidence pre-filter and the row-level inclusion rules
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping I/O and parse failures

pub mod boundaries;
pub mod config;
pub mod error;
pub mod filter;
pub mod progress;
