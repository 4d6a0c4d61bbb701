//! CPUE Processor Library
//!
//! A Rust library for computing catch-per-unit-effort (CPUE) statistics from
//! fisheries survey catch records.
//!
//! This library provides tools for:
//! - Resolving species identifiers across code, common-name, and
//!   scientific-name schemes
//! - Assigning catch records to named size strata from length-range rules
//! - Normalizing per-visit sampling effort to hours
//! - Zero-fill expansion so observed absence is distinguishable from
//!   missing data
//! - Aggregating per-sample CPUE to mean/sd/se/min/max/cv per waterbody,
//!   year, season, species, and stratum, with ±2 SE confidence bands
//! - Historical quartile baseline envelopes for time-series overlays
//!
//! The input is a polars DataFrame of raw catch records from the upstream
//! summarization step; the outputs are aggregate and baseline tables consumed
//! by the plotting collaborator. Plot rendering, figure export, and date
//! parsing live outside this crate.

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod catch_table;
        pub mod cpue_pipeline;
    }
}

// Re-export commonly used types
pub use app::models::{AggregateRow, BaselineRow, RawCatchRecord, SpeciesLookup, VisitKey};
pub use app::services::catch_table::{OutputMode, SummaryTables, summary_tables};
pub use app::services::cpue_pipeline::{CpueSummarizer, CpueSummary, PipelineStats};
pub use config::{StrataSpec, StratumRange};
pub use error::{CpueError, Result};
