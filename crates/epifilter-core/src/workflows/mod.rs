//! # Workflows Module
//!
//! Top-level entry points that tie the [`crate::core`] readers and the
//! [`crate::engine`] filter together.
//!
//! - **Filter Pipeline** ([`pipeline`]) - Loads predictions and annotations for
//!   each configured protein, filters them and writes one CSV per protein.

pub mod pipeline;
