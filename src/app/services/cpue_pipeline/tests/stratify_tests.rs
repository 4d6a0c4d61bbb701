//! Tests for size-stratum assignment

use super::*;
use crate::app::services::cpue_pipeline::stratify::assign_stratum;
use crate::constants::ALL_LENGTHS_STRATUM;

#[test]
fn test_no_specification_assigns_all() {
    assert_eq!(
        assign_stratum(None, "BLG", Some(12.0)),
        Some(ALL_LENGTHS_STRATUM.to_string())
    );
}

#[test]
fn test_species_absent_from_specification_assigns_all() {
    let strata = overlapping_bluegill_strata();
    assert_eq!(
        assign_stratum(Some(&strata), "LMB", Some(30.0)),
        Some(ALL_LENGTHS_STRATUM.to_string())
    );
}

#[test]
fn test_in_range_assignment() {
    let strata = overlapping_bluegill_strata();
    assert_eq!(
        assign_stratum(Some(&strata), "BLG", Some(5.0)),
        Some("YOY".to_string())
    );
    assert_eq!(
        assign_stratum(Some(&strata), "BLG", Some(40.0)),
        Some("Quality".to_string())
    );
}

#[test]
fn test_bounds_are_inclusive() {
    let strata = overlapping_bluegill_strata();
    assert_eq!(
        assign_stratum(Some(&strata), "BLG", Some(0.0)),
        Some("YOY".to_string())
    );
    assert_eq!(
        assign_stratum(Some(&strata), "BLG", Some(50.0)),
        Some("Quality".to_string())
    );
}

#[test]
fn test_overlap_last_declaration_wins() {
    // Length 18 falls in both YOY [0, 20] and Quality [15, 50]; the later
    // declaration overwrites the earlier assignment.
    let strata = overlapping_bluegill_strata();
    assert_eq!(
        assign_stratum(Some(&strata), "BLG", Some(18.0)),
        Some("Quality".to_string())
    );
}

#[test]
fn test_out_of_range_length_is_unassigned() {
    let strata = overlapping_bluegill_strata();
    assert_eq!(assign_stratum(Some(&strata), "BLG", Some(60.0)), None);
}

#[test]
fn test_gap_between_ranges_is_unassigned() {
    let mut strata = crate::config::StrataSpec::new();
    strata.add_range("BLG", "YOY", 0.0, 8.0);
    strata.add_range("BLG", "Quality", 15.0, 50.0);

    // Ranges need not be contiguous; the gap is excluded from stratification
    assert_eq!(assign_stratum(Some(&strata), "BLG", Some(10.0)), None);
}

#[test]
fn test_missing_length_with_specification_is_unassigned() {
    let strata = overlapping_bluegill_strata();
    assert_eq!(assign_stratum(Some(&strata), "BLG", None), None);
}

#[test]
fn test_missing_length_without_specification_assigns_all() {
    assert_eq!(
        assign_stratum(None, "BLG", None),
        Some(ALL_LENGTHS_STRATUM.to_string())
    );
}
