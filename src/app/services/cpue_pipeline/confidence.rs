//! Confidence bands for aggregate rows
//!
//! Appends the lower/upper interval bounds, mean -/+ 2 standard errors, to
//! each aggregate row. Purely arithmetic: NaN standard errors (n = 1 groups,
//! missing effort) propagate to NaN bounds, and no error conditions exist.

use crate::app::models::AggregateRow;
use crate::constants::CONFIDENCE_SE_MULTIPLIER;

/// Fill in the lower/upper confidence bounds of every row.
pub fn apply_confidence_bands(rows: &mut [AggregateRow]) {
    for row in rows.iter_mut() {
        row.lower_cpue = row.mean_cpue - CONFIDENCE_SE_MULTIPLIER * row.se_cpue;
        row.upper_cpue = row.mean_cpue + CONFIDENCE_SE_MULTIPLIER * row.se_cpue;
    }
}
