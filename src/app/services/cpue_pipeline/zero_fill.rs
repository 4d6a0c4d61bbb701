//! Zero-fill expansion of observed counts
//!
//! A species that was not recorded at a visit is an observed absence, not
//! missing data. This stage materializes the full cross-product of the visit
//! set and every (species, stratum) combination observed anywhere in the
//! filtered dataset, left-joins the observed counts onto it, and fills the
//! unmatched combinations with an explicit zero. Omitting this step would
//! silently drop zero-catch visits from the mean and bias CPUE upward.

use crate::app::models::{SampleCpue, VisitKey};
use crate::config::StrataSpec;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Observed counts keyed by (visit, species code, stratum).
pub type ObservedCounts = BTreeMap<(VisitKey, String, String), f64>;

/// (species code, stratum) combinations observed in the filtered dataset.
pub type SpeciesStrataCombos = BTreeSet<(String, String)>;

/// Expand observed counts to the full visit x combination cross-product.
///
/// Combinations whose stratum is not legitimate for the species under the
/// strata specification are dropped after the join. The per-sample CPUE is
/// computed here as count / effort hours; visits without a usable effort
/// reading yield NaN CPUE rather than an error.
pub fn expand_zero_filled(
    visit_efforts: &BTreeMap<VisitKey, f64>,
    observed: &ObservedCounts,
    combos: &SpeciesStrataCombos,
    strata: Option<&StrataSpec>,
) -> Vec<SampleCpue> {
    let mut samples = Vec::with_capacity(visit_efforts.len() * combos.len());
    let mut zero_filled = 0usize;

    for (visit, effort_hours) in visit_efforts {
        for (species_code, stratum) in combos {
            if let Some(spec) = strata {
                if !spec.is_valid_stratum(species_code, stratum) {
                    continue;
                }
            }

            let key = (visit.clone(), species_code.clone(), stratum.clone());
            let count = match observed.get(&key) {
                Some(count) => *count,
                None => {
                    zero_filled += 1;
                    0.0
                }
            };

            samples.push(SampleCpue {
                visit: visit.clone(),
                species_code: species_code.clone(),
                stratum: stratum.clone(),
                count,
                effort_hours: *effort_hours,
                cpue: count / effort_hours,
            });
        }
    }

    debug!(
        "Zero-fill expansion: {} visits x {} combinations -> {} samples ({} filled with zero)",
        visit_efforts.len(),
        combos.len(),
        samples.len(),
        zero_filled
    );

    samples
}
