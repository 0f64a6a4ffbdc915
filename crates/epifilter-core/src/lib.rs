//! # EpiFilter Core Library
//!
//! Post-processing for structural epitope predictions: residues predicted as
//! epitopes are dropped when they fall inside N-terminal or C-terminal domains,
//! or on the wrong side of an LPXTG cell-wall anchor, as annotated by
//! InterProScan.
//!
//! ## Architecture
//!
//! - **[`core`]: Data and I/O.** Epitope and domain models, the DiscoTope CSV
//!   loader and writer, and the InterProScan TSV parser.
//!
//! - **[`engine`]: The Filtering Logic.** Boundary reduction per sequence,
//!   the row-level inclusion rules, configuration and error types.
//!
//! - **[`workflows`]: The Public API.** The batch pipeline that runs the
//!   loader, parser and filter for each configured protein and writes the
//!   results.

pub mod core;
pub mod engine;
pub mod workflows;
