//! Top-level module for the n-gram model.
//!
//! This module provides:
//! - Symbol splitting (`Granularity`)
//! - Per-context transition counts (`State`)
//! - The frequency table and its builders (`FrequencyTable`)
//! - Generation configuration (`GenerationInput`, `RecoveryPolicy`)
//! - Weighted sequence generation (`Generator`)

/// Frequency table of `n`-gram counts.
///
/// Supports single-pass and multithreaded construction, merging,
/// count queries and binary persistence.
pub mod frequency_table;

/// High-level interface for sampling sequences from a frequency table.
pub mod generator;

/// Generation parameters: seed, target length, recovery policy, RNG seed.
pub mod generation_input;

/// Character or word symbols.
pub mod granularity;

/// Single context of the table.
///
/// Tracks outgoing transitions and supports weighted random sampling.
pub mod state;
