//! Tabular boundary between the pipeline and its collaborators
//!
//! The upstream summarization step hands the pipeline a polars DataFrame of
//! raw catch records; the plotting collaborator consumes the aggregate and
//! baseline tables as DataFrames keyed compatibly on (waterbody, season,
//! species, stratum, year). This module owns both conversions: fail-fast
//! validation of the required input columns, typed record extraction, and
//! output-table construction.

use crate::app::models::{AggregateRow, BaselineRow, RawCatchRecord};
use crate::constants::{baseline, catch, summary};
use crate::error::{CpueError, Result};
use polars::prelude::*;
use std::str::FromStr;
use tracing::{debug, warn};

use super::cpue_pipeline::CpueSummarizer;

// =============================================================================
// Input validation and extraction
// =============================================================================

/// Check that every required catch-table column is present.
///
/// Detected before any aggregation begins, so a malformed table fails fast
/// instead of surfacing as a confusing join error mid-pipeline.
pub fn validate_required_columns(df: &DataFrame) -> Result<()> {
    let missing: Vec<String> = catch::REQUIRED
        .iter()
        .copied()
        .filter(|name| df.column(name).is_err())
        .map(String::from)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CpueError::data_shape(missing))
    }
}

/// Extract typed catch records from the input DataFrame.
///
/// Key columns are cast to their contract dtypes (numeric site identifiers
/// are tolerated and stringified). Rows with a null key or count are not
/// usable as samples and are skipped with a warning; null effort and length
/// are legitimate missing values and carry through as `None`.
pub fn records_from_dataframe(df: &DataFrame) -> Result<Vec<RawCatchRecord>> {
    validate_required_columns(df)?;

    let waterbody = string_values(df, catch::WATERBODY)?;
    let site = string_values(df, catch::SITE)?;
    let year = i32_values(df, catch::YEAR)?;
    let season = string_values(df, catch::SEASON)?;
    let species_code = string_values(df, catch::SPECIES_CODE)?;
    let species_common = string_values(df, catch::SPECIES_COMMON)?;
    let species_scientific = string_values(df, catch::SPECIES_SCIENTIFIC)?;
    let count = f64_values(df, catch::COUNT)?;
    let effort = f64_values(df, catch::EFFORT)?;

    // Optional length column; absent for tally-only surveys
    let length = match df.column(catch::LENGTH_CM) {
        Ok(_) => Some(f64_values(df, catch::LENGTH_CM)?),
        Err(_) => None,
    };

    let mut records = Vec::with_capacity(df.height());
    let mut skipped = 0usize;

    for i in 0..df.height() {
        let row = (
            waterbody.get(i),
            site.get(i),
            year.get(i),
            season.get(i),
            species_code.get(i),
            species_common.get(i),
            species_scientific.get(i),
            count.get(i),
        );

        let (
            Some(waterbody),
            Some(site),
            Some(year),
            Some(season),
            Some(species_code),
            Some(species_common),
            Some(species_scientific),
            Some(count),
        ) = row
        else {
            skipped += 1;
            continue;
        };

        records.push(RawCatchRecord {
            waterbody: waterbody.to_string(),
            site: site.to_string(),
            year,
            season: season.to_string(),
            species_code: species_code.to_string(),
            species_common: species_common.to_string(),
            species_scientific: species_scientific.to_string(),
            length_cm: length.as_ref().and_then(|ca| ca.get(i)),
            count,
            effort_minutes: effort.get(i),
        });
    }

    if skipped > 0 {
        warn!(
            "Skipped {} of {} input rows with null key or count values",
            skipped,
            df.height()
        );
    }
    debug!("Extracted {} catch records from input table", records.len());

    Ok(records)
}

fn string_values(df: &DataFrame, name: &str) -> Result<StringChunked> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series.str()?.clone())
}

fn f64_values(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.clone())
}

fn i32_values(df: &DataFrame, name: &str) -> Result<Int32Chunked> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    Ok(series.i32()?.clone())
}

// =============================================================================
// Output tables
// =============================================================================

/// Render the aggregate CPUE rows as a DataFrame sorted by the full group key.
pub fn aggregate_rows_to_dataframe(rows: &[AggregateRow]) -> Result<DataFrame> {
    let df = df!(
        summary::WATERBODY => rows.iter().map(|r| r.waterbody.as_str()).collect::<Vec<_>>(),
        summary::YEAR => rows.iter().map(|r| r.year).collect::<Vec<_>>(),
        summary::SEASON => rows.iter().map(|r| r.season.as_str()).collect::<Vec<_>>(),
        summary::SPECIES_CODE => rows.iter().map(|r| r.species_code.as_str()).collect::<Vec<_>>(),
        summary::SPECIES_COMMON => rows.iter().map(|r| r.species_common.as_str()).collect::<Vec<_>>(),
        summary::SPECIES_SCIENTIFIC => rows.iter().map(|r| r.species_scientific.as_str()).collect::<Vec<_>>(),
        summary::STRATUM => rows.iter().map(|r| r.stratum.as_str()).collect::<Vec<_>>(),
        summary::N => rows.iter().map(|r| r.n as u32).collect::<Vec<_>>(),
        summary::MEAN_CPUE => rows.iter().map(|r| r.mean_cpue).collect::<Vec<_>>(),
        summary::SD_CPUE => rows.iter().map(|r| r.sd_cpue).collect::<Vec<_>>(),
        summary::SE_CPUE => rows.iter().map(|r| r.se_cpue).collect::<Vec<_>>(),
        summary::MIN_CPUE => rows.iter().map(|r| r.min_cpue).collect::<Vec<_>>(),
        summary::MAX_CPUE => rows.iter().map(|r| r.max_cpue).collect::<Vec<_>>(),
        summary::CV_CPUE => rows.iter().map(|r| r.cv_cpue).collect::<Vec<_>>(),
        summary::LOWER_CPUE => rows.iter().map(|r| r.lower_cpue).collect::<Vec<_>>(),
        summary::UPPER_CPUE => rows.iter().map(|r| r.upper_cpue).collect::<Vec<_>>(),
    )?;

    Ok(sort_by_group_key(df)?)
}

/// Render the baseline envelope rows as a DataFrame sorted by the group key.
pub fn baseline_rows_to_dataframe(rows: &[BaselineRow]) -> Result<DataFrame> {
    let df = df!(
        summary::WATERBODY => rows.iter().map(|r| r.waterbody.as_str()).collect::<Vec<_>>(),
        summary::YEAR => rows.iter().map(|r| r.year).collect::<Vec<_>>(),
        summary::SEASON => rows.iter().map(|r| r.season.as_str()).collect::<Vec<_>>(),
        summary::SPECIES_CODE => rows.iter().map(|r| r.species_code.as_str()).collect::<Vec<_>>(),
        summary::SPECIES_COMMON => rows.iter().map(|r| r.species_common.as_str()).collect::<Vec<_>>(),
        summary::SPECIES_SCIENTIFIC => rows.iter().map(|r| r.species_scientific.as_str()).collect::<Vec<_>>(),
        summary::STRATUM => rows.iter().map(|r| r.stratum.as_str()).collect::<Vec<_>>(),
        baseline::Q25_CPUE => rows.iter().map(|r| r.q25_cpue).collect::<Vec<_>>(),
        baseline::MEDIAN_CPUE => rows.iter().map(|r| r.median_cpue).collect::<Vec<_>>(),
        baseline::Q75_CPUE => rows.iter().map(|r| r.q75_cpue).collect::<Vec<_>>(),
    )?;

    Ok(sort_by_group_key(df)?)
}

fn sort_by_group_key(df: DataFrame) -> PolarsResult<DataFrame> {
    df.lazy()
        .sort_by_exprs(
            [
                col(summary::WATERBODY),
                col(summary::YEAR),
                col(summary::SEASON),
                col(summary::SPECIES_CODE),
                col(summary::STRATUM),
            ],
            SortMultipleOptions::default(),
        )
        .collect()
}

// =============================================================================
// Boundary API
// =============================================================================

/// Which output tables a summarization call should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Aggregate CPUE table only
    Aggregate,
    /// Historical baseline envelope only
    Baseline,
    /// Both tables
    Combined,
}

impl FromStr for OutputMode {
    type Err = CpueError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "aggregate" => Ok(Self::Aggregate),
            "baseline" => Ok(Self::Baseline),
            "combined" => Ok(Self::Combined),
            other => Err(CpueError::configuration(format!(
                "unrecognized output mode '{}'; expected 'aggregate', 'baseline', or 'combined'",
                other
            ))),
        }
    }
}

/// Output tables of a summarization call, per the requested mode.
#[derive(Debug, Clone)]
pub struct SummaryTables {
    /// Aggregate CPUE table, when requested
    pub aggregate: Option<DataFrame>,
    /// Historical baseline envelope, when requested
    pub baseline: Option<DataFrame>,
}

/// Compute the requested output tables from an input catch DataFrame.
///
/// The baseline envelope aggregates over all years regardless of the year
/// filter and is broadcast across the filtered years (or every year present
/// when no filter is given), so the two tables overlay directly.
pub fn summary_tables(
    summarizer: &CpueSummarizer,
    input: &DataFrame,
    species_tokens: &[String],
    years: Option<&[i32]>,
    seasons: Option<&[String]>,
    mode: OutputMode,
) -> Result<SummaryTables> {
    let records = records_from_dataframe(input)?;

    let aggregate = if matches!(mode, OutputMode::Aggregate | OutputMode::Combined) {
        let result = summarizer.compute_cpue_summary(&records, species_tokens, years, seasons)?;
        Some(aggregate_rows_to_dataframe(&result.rows)?)
    } else {
        None
    };

    let baseline = if matches!(mode, OutputMode::Baseline | OutputMode::Combined) {
        let rows = summarizer.historical_baseline(&records, species_tokens, seasons, years)?;
        Some(baseline_rows_to_dataframe(&rows)?)
    } else {
        None
    };

    Ok(SummaryTables {
        aggregate,
        baseline,
    })
}
