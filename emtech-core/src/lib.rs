//! N-gram language model and text generator.
//!
//! This crate provides the whole pipeline:
//! - Text normalization of raw sources into one corpus
//! - Character or word n-gram frequency tables
//! - Weighted probabilistic generation with unseen-context recovery
//! - Token-length analysis of generated text
//! - Binary persistence and CSV export of tables

/// Token-length histograms and dictionary checks.
pub mod analysis;

/// Error type shared by the crate.
pub mod error;

/// CSV export of frequency tables.
pub mod export;

/// File helpers (reading sources, atomic writes, path building).
pub mod io;

/// N-gram models and generation logic.
pub mod model;

/// Boilerplate stripping and character cleaning.
pub mod normalizer;

pub use error::{NgramError, Result};
pub use model::frequency_table::FrequencyTable;
pub use model::generation_input::{GenerationInput, RecoveryPolicy};
pub use model::generator::{GenerationReport, Generator};
pub use model::granularity::Granularity;
