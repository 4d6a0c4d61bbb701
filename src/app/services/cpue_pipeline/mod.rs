//! CPUE aggregation pipeline for fisheries survey records
//!
//! This module provides the complete pipeline that converts raw per-sample
//! catch records into mean CPUE estimates with dispersion statistics,
//! correctly handling absent/zero catches, size stratification, and
//! heterogeneous species-naming schemes.
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`summarizer`] - Main CpueSummarizer struct and pipeline orchestration
//! - [`resolver`] - Species token resolution and lookup construction
//! - [`stratify`] - Size-stratum assignment from length-range rules
//! - [`effort`] - Per-visit effort normalization
//! - [`zero_fill`] - Visit x species/stratum cross-product expansion
//! - [`aggregate`] - Per-sample CPUE and grouped descriptive statistics
//! - [`confidence`] - Mean +/- 2 SE interval bounds
//! - [`baseline`] - Historical quartile envelopes for plotting overlays
//! - [`stats`] - Pipeline statistics and result structures
//!
//! # Processing Pipeline
//!
//! A summarization call runs these stages in order, each a pure function
//! taking and returning immutable values:
//!
//! 1. **Period filtering**: restrict to the requested years and seasons
//! 2. **Species resolution**: map user tokens (codes, common names, or
//!    scientific names) to canonical species codes
//! 3. **Effort normalization**: derive one effort-hours value per visit
//! 4. **Zero-fill expansion**: materialize explicit zero-count samples for
//!    every visit where a selected species/stratum was not observed
//! 5. **Aggregation**: descriptive statistics per (waterbody, year, season,
//!    species, stratum) group, stratified and unstratified
//! 6. **Confidence banding**: lower/upper bounds per aggregate row
//!
//! # Zero-catch Philosophy
//!
//! A visit where a species was not recorded is an observed absence, not
//! missing data. The zero-fill stage makes that distinction explicit, so
//! zero-catch visits pull the group mean down instead of silently vanishing
//! from it. Degenerate statistics (n = 1 groups, all-missing effort) are
//! reported as NaN rather than suppressed; NaN is valid output signaling
//! insufficient data.

pub mod aggregate;
pub mod baseline;
pub mod confidence;
pub mod effort;
pub mod resolver;
pub mod stats;
pub mod stratify;
pub mod summarizer;
pub mod zero_fill;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use stats::{CpueSummary, PipelineStats};
pub use summarizer::CpueSummarizer;

// Re-export stage functions that are useful on their own
pub use aggregate::{aggregate_cpue, summarize_samples};
pub use baseline::summarize_historical_envelope;
pub use confidence::apply_confidence_bands;
pub use effort::{build_visit_efforts, effort_hours};
pub use resolver::{build_species_lookup, resolve_species_tokens};
pub use stratify::assign_stratum;
pub use zero_fill::expand_zero_filled;
