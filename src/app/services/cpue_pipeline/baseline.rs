//! Historical baseline envelopes
//!
//! Summarizes the long-run distribution of mean CPUE per (waterbody, season,
//! species, stratum) group as a 25th/50th/75th percentile triple, and
//! broadcasts that triple across every year of the requested display range.
//! The plotting collaborator overlays the resulting flat envelope on the
//! time series for visual baseline comparison.

use crate::app::models::{AggregateRow, BaselineRow};
use crate::constants::BASELINE_QUANTILES;
use std::collections::BTreeMap;
use tracing::debug;

/// Compute the historical quartile envelope from the full aggregate history.
///
/// `history` should span all years of interest, not just the display range.
/// NaN mean CPUE values (insufficient-data groups) are excluded from the
/// quantile computation; a group whose history is entirely NaN produces no
/// envelope rows.
pub fn summarize_historical_envelope(
    history: &[AggregateRow],
    display_years: &[i32],
) -> Vec<BaselineRow> {
    // Group key: (waterbody, season, species, stratum); years collapse
    let mut groups: BTreeMap<(String, String, String, String), GroupHistory> = BTreeMap::new();
    for row in history {
        let entry = groups
            .entry((
                row.waterbody.clone(),
                row.season.clone(),
                row.species_code.clone(),
                row.stratum.clone(),
            ))
            .or_insert_with(|| GroupHistory {
                species_common: row.species_common.clone(),
                species_scientific: row.species_scientific.clone(),
                means: Vec::new(),
            });
        if !row.mean_cpue.is_nan() {
            entry.means.push(row.mean_cpue);
        }
    }

    let mut rows = Vec::new();
    for ((waterbody, season, species_code, stratum), group) in groups {
        if group.means.is_empty() {
            debug!(
                "No finite historical means for {}/{}/{}/{}; skipping envelope",
                waterbody, season, species_code, stratum
            );
            continue;
        }

        let mut sorted = group.means;
        sorted.sort_by(f64::total_cmp);

        let [q25, median, q75] = BASELINE_QUANTILES.map(|q| quantile_linear(&sorted, q));

        for &year in display_years {
            rows.push(BaselineRow {
                waterbody: waterbody.clone(),
                year,
                season: season.clone(),
                species_code: species_code.clone(),
                species_common: group.species_common.clone(),
                species_scientific: group.species_scientific.clone(),
                stratum: stratum.clone(),
                q25_cpue: q25,
                median_cpue: median,
                q75_cpue: q75,
            });
        }
    }

    rows
}

struct GroupHistory {
    species_common: String,
    species_scientific: String,
    means: Vec<f64>,
}

/// Quantile of a sorted, non-empty slice by linear interpolation between
/// order statistics (the R default method).
fn quantile_linear(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}
