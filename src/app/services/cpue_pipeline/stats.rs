//! Pipeline statistics and result structures for CPUE summarization
//!
//! This module provides types for tracking how many records, visits, and
//! samples flowed through each pipeline stage, and for organizing the
//! aggregate output for downstream consumers.

use crate::app::models::AggregateRow;

/// Statistics for one CPUE summarization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStats {
    /// Total number of input catch records
    pub total_input: usize,
    /// Records remaining after the year/season filter
    pub period_filtered: usize,
    /// Distinct (waterbody, site, year, season) visits in the filtered data
    pub visits: usize,
    /// Species codes the user tokens resolved to
    pub species_resolved: usize,
    /// Expanded per-sample rows in the stratified pipeline
    pub stratified_samples: usize,
    /// Expanded per-sample rows in the unstratified pipeline
    pub unstratified_samples: usize,
    /// Records excluded from the stratified pipeline because their length
    /// matched no declared stratum
    pub unassigned_length_records: usize,
    /// Rows in the final aggregate table
    pub output_rows: usize,
}

impl PipelineStats {
    /// Create new empty pipeline statistics
    pub fn new() -> Self {
        Self {
            total_input: 0,
            period_filtered: 0,
            visits: 0,
            species_resolved: 0,
            stratified_samples: 0,
            unstratified_samples: 0,
            unassigned_length_records: 0,
            output_rows: 0,
        }
    }

    /// Fraction of input records that survived the year/season filter, as a
    /// percentage
    pub fn period_retention_rate(&self) -> f64 {
        if self.total_input == 0 {
            100.0
        } else {
            (self.period_filtered as f64 / self.total_input as f64) * 100.0
        }
    }

    /// Get summary of pipeline statistics for logging
    pub fn summary(&self) -> String {
        format!(
            "CPUE summary: {} input records -> {} in period ({:.1}%) | \
             {} visits | {} species | samples: {} stratified / {} unstratified | \
             {} unassigned lengths | {} output rows",
            self.total_input,
            self.period_filtered,
            self.period_retention_rate(),
            self.visits,
            self.species_resolved,
            self.stratified_samples,
            self.unstratified_samples,
            self.unassigned_length_records,
            self.output_rows
        )
    }
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a CPUE summarization run
#[derive(Debug, Clone)]
pub struct CpueSummary {
    /// Aggregate rows, sorted by (waterbody, year, season, species, stratum)
    pub rows: Vec<AggregateRow>,
    /// Pipeline statistics
    pub stats: PipelineStats,
}

impl CpueSummary {
    /// Create a new summary result
    pub fn new(rows: Vec<AggregateRow>, stats: PipelineStats) -> Self {
        Self { rows, stats }
    }

    /// Number of aggregate rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Distinct years covered by the aggregate rows, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}
