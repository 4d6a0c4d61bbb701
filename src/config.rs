//! Size-strata configuration.
//!
//! Provides the per-species length-range rules used to assign catch records
//! to named size strata (e.g. young-of-year vs. quality-size). Range
//! declaration order is significant: when ranges overlap, the last declared
//! range that matches a length wins.

use crate::constants::{ALL_LENGTHS_STRATUM, ALL_SIZES_STRATUM};
use crate::error::{CpueError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// A single named length range, inclusive at both bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StratumRange {
    /// Stratum label (e.g. "YOY", "Quality")
    pub name: String,

    /// Minimum length in cm, inclusive
    pub min_length_cm: f64,

    /// Maximum length in cm, inclusive
    pub max_length_cm: f64,
}

impl StratumRange {
    /// Check whether a length falls inside this range
    pub fn contains(&self, length_cm: f64) -> bool {
        length_cm >= self.min_length_cm && length_cm <= self.max_length_cm
    }

    /// Check whether two ranges share any length
    fn overlaps(&self, other: &StratumRange) -> bool {
        self.min_length_cm <= other.max_length_cm && other.min_length_cm <= self.max_length_cm
    }
}

/// Per-species size-strata specification.
///
/// Maps a species code to its declared strata ranges. Species absent from the
/// specification get a single implicit stratum covering every length. Ranges
/// for a species need not be contiguous or exhaustive; lengths outside all
/// declared ranges are excluded from the stratified aggregate (but still
/// counted in the unstratified one).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrataSpec {
    /// Species code -> declared ranges, in declaration order
    pub species: BTreeMap<String, Vec<StratumRange>>,
}

impl StrataSpec {
    /// Create an empty specification (every species falls in the implicit
    /// "All" stratum)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stratum range for a species, preserving declaration order
    pub fn add_range(
        &mut self,
        species_code: impl Into<String>,
        name: impl Into<String>,
        min_length_cm: f64,
        max_length_cm: f64,
    ) -> &mut Self {
        self.species
            .entry(species_code.into())
            .or_default()
            .push(StratumRange {
                name: name.into(),
                min_length_cm,
                max_length_cm,
            });
        self
    }

    /// Check whether a species has declared strata
    pub fn has_species(&self, species_code: &str) -> bool {
        self.species.contains_key(species_code)
    }

    /// Declared ranges for a species, in declaration order
    pub fn ranges_for(&self, species_code: &str) -> Option<&[StratumRange]> {
        self.species.get(species_code).map(|v| v.as_slice())
    }

    /// Check whether a stratum label is legitimate for a species.
    ///
    /// The unstratified label is valid for every species. A species with
    /// declared ranges admits exactly its declared labels; a species without
    /// any admits only the implicit all-lengths label.
    pub fn is_valid_stratum(&self, species_code: &str, stratum: &str) -> bool {
        if stratum == ALL_SIZES_STRATUM {
            return true;
        }
        match self.species.get(species_code) {
            Some(ranges) => ranges.iter().any(|r| r.name == stratum),
            None => stratum == ALL_LENGTHS_STRATUM,
        }
    }

    /// Validate the specification.
    ///
    /// Inverted ranges (min > max) are configuration errors. Overlapping
    /// ranges are accepted with last-match-wins semantics but logged as
    /// warnings, since overlap is usually a data-entry mistake.
    pub fn validate(&self) -> Result<()> {
        for (code, ranges) in &self.species {
            if ranges.is_empty() {
                return Err(CpueError::configuration(format!(
                    "Species '{}' has an empty strata list; omit it instead",
                    code
                )));
            }

            for range in ranges {
                if range.min_length_cm > range.max_length_cm {
                    return Err(CpueError::configuration(format!(
                        "Stratum '{}' for species '{}' has min length {} above max length {}",
                        range.name, code, range.min_length_cm, range.max_length_cm
                    )));
                }
            }

            for (i, a) in ranges.iter().enumerate() {
                for b in &ranges[i + 1..] {
                    if a.overlaps(b) {
                        warn!(
                            "Overlapping strata for species '{}': '{}' [{}, {}] and '{}' [{}, {}]; \
                             the later declaration wins for lengths in both",
                            code,
                            a.name,
                            a.min_length_cm,
                            a.max_length_cm,
                            b.name,
                            b.min_length_cm,
                            b.max_length_cm
                        );
                    }
                }
            }
        }

        Ok(())
    }
}
