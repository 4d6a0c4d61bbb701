//! Effort normalization per site visit
//!
//! Effort is recorded in minutes and is nominally constant across all records
//! of a visit. In practice readings can disagree or be missing, so the
//! per-visit effort is defined as the mean of the available readings,
//! converted to hours for the CPUE denominator.

use crate::app::models::{RawCatchRecord, VisitKey};
use crate::constants::MINUTES_PER_HOUR;
use std::collections::BTreeMap;
use tracing::debug;

/// Mean of the non-missing effort readings, in hours.
///
/// Returns NaN when every reading is missing; the NaN propagates into the
/// visit's CPUE values downstream rather than raising an error.
pub fn effort_hours(effort_minutes: &[Option<f64>]) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for minutes in effort_minutes.iter().flatten() {
        sum += minutes;
        n += 1;
    }

    if n == 0 {
        f64::NAN
    } else {
        (sum / n as f64) / MINUTES_PER_HOUR
    }
}

/// Derive the full visit set with its per-visit effort in hours.
///
/// Every (waterbody, site, year, season) tuple present in the records appears
/// in the map, whichever species its records belong to. The effort of a visit
/// is taken over all of the visit's records, not only those of the species
/// under analysis.
pub fn build_visit_efforts(records: &[RawCatchRecord]) -> BTreeMap<VisitKey, f64> {
    let mut readings: BTreeMap<VisitKey, Vec<Option<f64>>> = BTreeMap::new();
    for record in records {
        readings
            .entry(record.visit_key())
            .or_default()
            .push(record.effort_minutes);
    }

    let visits: BTreeMap<VisitKey, f64> = readings
        .into_iter()
        .map(|(visit, efforts)| {
            let hours = effort_hours(&efforts);
            (visit, hours)
        })
        .collect();

    let missing = visits.values().filter(|h| h.is_nan()).count();
    if missing > 0 {
        debug!(
            "{} of {} visits have no usable effort reading; their CPUE will be NaN",
            missing,
            visits.len()
        );
    }

    visits
}
