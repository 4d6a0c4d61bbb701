//! CPUE summarization orchestration
//!
//! This module contains the main CpueSummarizer struct and coordinates the
//! complete aggregation pipeline: period filtering, species resolution, visit
//! effort derivation, zero-fill expansion, dual-pipeline aggregation, and
//! confidence banding. Each stage is a pure function over an immutable value;
//! the summarizer only wires them together and accounts for the row counts.

use crate::app::models::{BaselineRow, RawCatchRecord};
use crate::config::StrataSpec;
use crate::error::Result;
use tracing::{debug, info};

use super::{
    aggregate::aggregate_cpue,
    baseline::summarize_historical_envelope,
    confidence::apply_confidence_bands,
    effort::build_visit_efforts,
    resolver::{build_species_lookup, resolve_species_tokens},
    stats::{CpueSummary, PipelineStats},
};

/// Summarizer for fisheries survey catch records
///
/// Holds the validated size-strata configuration and computes mean CPUE
/// estimates with dispersion statistics per (waterbody, year, season,
/// species, stratum) group. The summarizer is stateless across calls: the
/// strata specification is read-only for the duration of a call, so
/// independent invocations may run concurrently.
///
/// # Example
///
/// ```rust
/// use cpue_processor::app::services::cpue_pipeline::CpueSummarizer;
/// use cpue_processor::config::StrataSpec;
///
/// # fn example(records: Vec<cpue_processor::app::models::RawCatchRecord>)
/// #     -> cpue_processor::Result<()> {
/// let mut strata = StrataSpec::new();
/// strata.add_range("BLG", "YOY", 0.0, 8.0);
/// strata.add_range("BLG", "Quality", 15.0, 50.0);
///
/// let summarizer = CpueSummarizer::new(Some(strata))?;
/// let summary = summarizer.compute_cpue_summary(
///     &records,
///     &["Bluegill".to_string()],
///     None,
///     None,
/// )?;
/// println!("{}", summary.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CpueSummarizer {
    /// Size-strata configuration; `None` disables stratification entirely
    strata: Option<StrataSpec>,
}

impl CpueSummarizer {
    /// Create a new summarizer with an optional size-strata specification
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the specification contains inverted
    /// ranges. Overlapping ranges are accepted with a logged warning.
    pub fn new(strata: Option<StrataSpec>) -> Result<Self> {
        if let Some(spec) = &strata {
            spec.validate()?;
        }
        Ok(Self { strata })
    }

    /// Get the strata specification used by this summarizer
    pub fn strata(&self) -> Option<&StrataSpec> {
        self.strata.as_ref()
    }

    /// Compute the aggregate CPUE table for the requested species and period.
    ///
    /// Runs the full pipeline over the records:
    ///
    /// 1. Year/season filtering (defaults: all years, all seasons present)
    /// 2. Species token resolution against the dataset's name columns
    /// 3. Per-visit effort derivation over the whole filtered visit set
    /// 4. Stratified and unstratified aggregation with zero-fill expansion
    /// 5. Confidence banding (mean +/- 2 SE)
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `species_tokens` is empty. All errors
    /// abort the call with no partial output.
    pub fn compute_cpue_summary(
        &self,
        records: &[RawCatchRecord],
        species_tokens: &[String],
        years: Option<&[i32]>,
        seasons: Option<&[String]>,
    ) -> Result<CpueSummary> {
        let mut stats = PipelineStats::new();
        stats.total_input = records.len();

        info!(
            "Starting CPUE summarization for {} records, {} species token(s)",
            records.len(),
            species_tokens.len()
        );

        let filtered = filter_period(records, years, seasons);
        stats.period_filtered = filtered.len();
        debug!(
            "Period filter retained {} of {} records",
            filtered.len(),
            records.len()
        );

        let lookup = build_species_lookup(&filtered);
        let resolved = resolve_species_tokens(species_tokens, &lookup)?;
        stats.species_resolved = resolved.len();

        // The visit set spans every visit in the filtered data, whichever
        // species it recorded; that is what makes absence an explicit zero.
        let visit_efforts = build_visit_efforts(&filtered);
        stats.visits = visit_efforts.len();

        let (mut rows, counts) =
            aggregate_cpue(&filtered, &resolved, &visit_efforts, self.strata.as_ref(), &lookup);
        stats.stratified_samples = counts.stratified_samples;
        stats.unstratified_samples = counts.unstratified_samples;
        stats.unassigned_length_records = counts.unassigned_length_records;

        apply_confidence_bands(&mut rows);
        stats.output_rows = rows.len();

        info!("{}", stats.summary());

        Ok(CpueSummary::new(rows, stats))
    }

    /// Compute the historical baseline envelope for the requested species.
    ///
    /// Aggregates over *all* years (the season filter still applies), takes
    /// the 25th/50th/75th percentile of mean CPUE per (waterbody, season,
    /// species, stratum) group, and broadcasts the triple across
    /// `display_years` (default: every year present in the history).
    pub fn historical_baseline(
        &self,
        records: &[RawCatchRecord],
        species_tokens: &[String],
        seasons: Option<&[String]>,
        display_years: Option<&[i32]>,
    ) -> Result<Vec<BaselineRow>> {
        let history = self.compute_cpue_summary(records, species_tokens, None, seasons)?;

        let all_years = history.years();
        let display_years = display_years.unwrap_or(&all_years);

        let envelope = summarize_historical_envelope(&history.rows, display_years);
        info!(
            "Historical baseline: {} envelope rows over {} display year(s)",
            envelope.len(),
            display_years.len()
        );

        Ok(envelope)
    }
}

/// Filter records to the requested years and seasons.
///
/// `None` filters keep everything; the defaults are therefore all years and
/// all seasons present in the dataset.
fn filter_period(
    records: &[RawCatchRecord],
    years: Option<&[i32]>,
    seasons: Option<&[String]>,
) -> Vec<RawCatchRecord> {
    records
        .iter()
        .filter(|r| years.is_none_or(|ys| ys.contains(&r.year)))
        .filter(|r| seasons.is_none_or(|ss| ss.iter().any(|s| *s == r.season)))
        .cloned()
        .collect()
}
