//! Readers and writers for the tabular inputs and outputs of the pipeline.
//!
//! DiscoTope predictions arrive as one directory of CSV files per protein and
//! are written back out in the same comma-separated layout after filtering.
//! Domain annotations come from InterProScan's headerless TSV format.

pub mod discotope;
pub mod interpro;
