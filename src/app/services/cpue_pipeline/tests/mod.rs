//! Comprehensive tests for the CPUE pipeline module
//!
//! This module provides unit tests for every pipeline component plus shared
//! fixture helpers for building catch records and strata specifications.

pub mod stratify_tests;

// Test helper functions and fixtures
use crate::app::models::{AggregateRow, RawCatchRecord};
use crate::config::StrataSpec;

/// Default test waterbody
pub const WATERBODY: &str = "Lake Ripley";

/// Create a test catch record on the default waterbody.
///
/// Species names are filled in from the code for the handful of codes the
/// tests use.
pub fn catch_record(
    site: &str,
    year: i32,
    season: &str,
    species_code: &str,
    length_cm: Option<f64>,
    count: f64,
    effort_minutes: Option<f64>,
) -> RawCatchRecord {
    let (common, scientific) = match species_code {
        "BLG" => ("Bluegill", "Lepomis macrochirus"),
        "LMB" => ("Largemouth Bass", "Micropterus salmoides"),
        "YEP" => ("Yellow Perch", "Perca flavescens"),
        other => (other, other),
    };

    RawCatchRecord {
        waterbody: WATERBODY.to_string(),
        site: site.to_string(),
        year,
        season: season.to_string(),
        species_code: species_code.to_string(),
        species_common: common.to_string(),
        species_scientific: scientific.to_string(),
        length_cm,
        count,
        effort_minutes,
    }
}

/// Strata specification with overlapping bluegill ranges: YOY [0, 20] then
/// Quality [15, 50]; lengths in both belong to Quality (last declaration
/// wins).
pub fn overlapping_bluegill_strata() -> StrataSpec {
    let mut strata = StrataSpec::new();
    strata.add_range("BLG", "YOY", 0.0, 20.0);
    strata.add_range("BLG", "Quality", 15.0, 50.0);
    strata
}

/// The two-site reference scenario: one year, one season, bluegill counts 4
/// and 6 with 10 minutes of effort each, giving per-site CPUE of 24/hr and
/// 36/hr.
pub fn two_site_records() -> Vec<RawCatchRecord> {
    vec![
        catch_record("S1", 2023, "Spring", "BLG", Some(12.0), 4.0, Some(10.0)),
        catch_record("S2", 2023, "Spring", "BLG", Some(14.0), 6.0, Some(10.0)),
    ]
}

/// Create an aggregate row carrying only the fields the baseline summarizer
/// reads; the dispersion fields are NaN.
pub fn history_row(year: i32, season: &str, species_code: &str, stratum: &str, mean: f64) -> AggregateRow {
    AggregateRow {
        waterbody: WATERBODY.to_string(),
        year,
        season: season.to_string(),
        species_code: species_code.to_string(),
        species_common: species_code.to_string(),
        species_scientific: species_code.to_string(),
        stratum: stratum.to_string(),
        n: 1,
        mean_cpue: mean,
        sd_cpue: f64::NAN,
        se_cpue: f64::NAN,
        min_cpue: mean,
        max_cpue: mean,
        cv_cpue: f64::NAN,
        lower_cpue: f64::NAN,
        upper_cpue: f64::NAN,
    }
}

/// Find the aggregate row for a species/stratum in a given year, panicking
/// when absent.
pub fn find_row<'a>(
    rows: &'a [AggregateRow],
    year: i32,
    species_code: &str,
    stratum: &str,
) -> &'a AggregateRow {
    rows.iter()
        .find(|r| r.year == year && r.species_code == species_code && r.stratum == stratum)
        .unwrap_or_else(|| panic!("no aggregate row for {}/{}/{}", year, species_code, stratum))
}
