//! Integration tests for the full DataFrame-to-tables summarization path
//!
//! Exercises the public API the way a calling application would: a raw catch
//! DataFrame in, aggregate and baseline DataFrames out.

use cpue_processor::constants::{catch, summary};
use cpue_processor::{CpueError, CpueSummarizer, OutputMode, StrataSpec, summary_tables};
use polars::prelude::*;

/// Two survey years on one waterbody: bluegill at two sites in 2022, and a
/// 2023 visit that recorded only largemouth bass (a zero-catch visit for
/// bluegill).
fn survey_frame() -> DataFrame {
    df!(
        catch::WATERBODY => ["Lake Ripley", "Lake Ripley", "Lake Ripley", "Lake Ripley"],
        catch::SITE => ["S1", "S2", "S1", "S1"],
        catch::YEAR => [2022i32, 2022, 2023, 2023],
        catch::SEASON => ["Spring", "Spring", "Spring", "Spring"],
        catch::SPECIES_CODE => ["BLG", "BLG", "BLG", "LMB"],
        catch::SPECIES_COMMON => ["Bluegill", "Bluegill", "Bluegill", "Largemouth Bass"],
        catch::SPECIES_SCIENTIFIC => [
            "Lepomis macrochirus",
            "Lepomis macrochirus",
            "Lepomis macrochirus",
            "Micropterus salmoides",
        ],
        catch::COUNT => [4.0, 6.0, 5.0, 2.0],
        catch::EFFORT => [10.0, 10.0, 10.0, 10.0],
        catch::LENGTH_CM => [Some(12.0), Some(14.0), Some(18.0), Some(30.0)],
    )
    .unwrap()
}

fn f64_at(frame: &DataFrame, column: &str, i: usize) -> f64 {
    frame
        .column(column)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .get(i)
        .unwrap()
}

#[test]
fn combined_mode_produces_overlay_compatible_tables() {
    let summarizer = CpueSummarizer::new(None).unwrap();
    let tables = summary_tables(
        &summarizer,
        &survey_frame(),
        &["Bluegill".to_string()],
        None,
        None,
        OutputMode::Combined,
    )
    .unwrap();

    let aggregate = tables.aggregate.unwrap();
    let baseline = tables.baseline.unwrap();

    // Both tables carry the shared overlay key columns
    for key in [
        summary::WATERBODY,
        summary::YEAR,
        summary::SEASON,
        summary::SPECIES_CODE,
        summary::STRATUM,
    ] {
        assert!(aggregate.column(key).is_ok(), "aggregate missing {key}");
        assert!(baseline.column(key).is_ok(), "baseline missing {key}");
    }

    // Without a strata spec every record lands in the implicit "All"
    // stratum, alongside the forced "All_Sizes" rows: two strata per year,
    // and the baseline is broadcast over both years per stratum
    assert_eq!(aggregate.height(), 4);
    assert_eq!(baseline.height(), 4);
}

#[test]
fn aggregate_values_match_hand_computation() {
    let summarizer = CpueSummarizer::new(None).unwrap();
    let tables = summary_tables(
        &summarizer,
        &survey_frame(),
        &["BLG".to_string()],
        Some(&[2022]),
        None,
        OutputMode::Aggregate,
    )
    .unwrap();

    let frame = tables.aggregate.unwrap();
    // "All" and "All_Sizes" rows with identical statistics
    assert_eq!(frame.height(), 2);

    // Counts 4 and 6 over 10 minutes: 24/hr and 36/hr
    assert_eq!(f64_at(&frame, summary::MEAN_CPUE, 0), 30.0);
    assert!((f64_at(&frame, summary::SE_CPUE, 0) - 6.0).abs() < 1e-9);
    assert!((f64_at(&frame, summary::LOWER_CPUE, 0) - 18.0).abs() < 1e-9);
    assert!((f64_at(&frame, summary::UPPER_CPUE, 0) - 42.0).abs() < 1e-9);
}

#[test]
fn zero_catch_visit_pulls_the_mean_down() {
    let summarizer = CpueSummarizer::new(None).unwrap();
    let tables = summary_tables(
        &summarizer,
        &survey_frame(),
        &["BLG".to_string()],
        Some(&[2023]),
        None,
        OutputMode::Aggregate,
    )
    .unwrap();

    let frame = tables.aggregate.unwrap();

    // 2023 has one bluegill visit at 30/hr; the LMB record shares the same
    // (site, year, season) key, so it is the same visit, not a zero.
    // Mean stays 30 with n = 1, in both the "All" and "All_Sizes" rows.
    assert_eq!(frame.height(), 2);
    assert_eq!(f64_at(&frame, summary::MEAN_CPUE, 0), 30.0);
    assert_eq!(f64_at(&frame, summary::MEAN_CPUE, 1), 30.0);
}

#[test]
fn stratified_summary_reports_size_classes() {
    let mut strata = StrataSpec::new();
    strata.add_range("BLG", "YOY", 0.0, 13.0);
    strata.add_range("BLG", "Quality", 13.5, 50.0);

    let summarizer = CpueSummarizer::new(Some(strata)).unwrap();
    let tables = summary_tables(
        &summarizer,
        &survey_frame(),
        &["BLG".to_string()],
        Some(&[2022]),
        None,
        OutputMode::Aggregate,
    )
    .unwrap();

    let frame = tables.aggregate.unwrap();
    let strata_col = frame
        .column(summary::STRATUM)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .clone();
    let labels: Vec<&str> = (0..frame.height())
        .map(|i| strata_col.get(i).unwrap())
        .collect();

    assert!(labels.contains(&"YOY"));
    assert!(labels.contains(&"Quality"));
    assert!(labels.contains(&"All_Sizes"));
}

#[test]
fn missing_columns_abort_before_aggregation() {
    let df = df!(
        catch::WATERBODY => ["Lake Ripley"],
        catch::YEAR => [2023i32],
    )
    .unwrap();

    let summarizer = CpueSummarizer::new(None).unwrap();
    let err = summary_tables(
        &summarizer,
        &df,
        &["BLG".to_string()],
        None,
        None,
        OutputMode::Aggregate,
    )
    .unwrap_err();

    assert!(matches!(err, CpueError::DataShape { .. }));
}

#[test]
fn unknown_output_mode_is_a_configuration_error() {
    let err = "figure".parse::<OutputMode>().unwrap_err();
    assert!(matches!(err, CpueError::Configuration { .. }));
}

#[test]
fn repeated_runs_are_bit_identical() {
    let summarizer = CpueSummarizer::new(None).unwrap();
    let run = || {
        summary_tables(
            &summarizer,
            &survey_frame(),
            &["BLG".to_string()],
            None,
            None,
            OutputMode::Aggregate,
        )
        .unwrap()
        .aggregate
        .unwrap()
    };

    assert!(run().equals_missing(&run()));
}
