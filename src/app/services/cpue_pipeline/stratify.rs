//! Size stratification of catch records
//!
//! Assigns each record to a named size stratum based on the per-species
//! length-range rules of the strata specification. Species absent from the
//! specification fall in a single implicit stratum covering every length.

use crate::config::StrataSpec;
use crate::constants::ALL_LENGTHS_STRATUM;

/// Assign a stratum label to a record's species and length.
///
/// Rules, in order:
/// - species has no entry in the specification: the implicit "All" stratum,
///   whatever the length;
/// - species has an entry and the length falls in one or more declared
///   ranges: the label of the *last* declared matching range (overlaps are
///   resolved by declaration order, not range precedence);
/// - species has an entry but the length is missing or outside every declared
///   range: `None`. The record is excluded from the stratified aggregate but
///   still counts toward the unstratified one.
///
/// Range bounds are inclusive on both ends.
pub fn assign_stratum(
    strata: Option<&StrataSpec>,
    species_code: &str,
    length_cm: Option<f64>,
) -> Option<String> {
    let ranges = match strata.and_then(|s| s.ranges_for(species_code)) {
        Some(ranges) => ranges,
        None => return Some(ALL_LENGTHS_STRATUM.to_string()),
    };

    let length_cm = length_cm?;

    let mut assigned = None;
    for range in ranges {
        if range.contains(length_cm) {
            // Last matching declaration wins
            assigned = Some(range.name.clone());
        }
    }

    assigned
}
