//! # Core Module
//!
//! Data models and file formats used by the filter.
//!
//! - [`models`] - Epitope rows and tables, domain hits and boundary summaries
//! - [`io`] - DiscoTope prediction CSVs and InterProScan annotation TSVs

pub mod io;
pub mod models;
