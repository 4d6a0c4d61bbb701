//! Data models for CPUE processing
//!
//! This module contains the core data structures for representing raw fisheries
//! survey catch records, the derived sampling units, and the aggregate output
//! rows consumed by the plotting collaborator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Raw catch records
// =============================================================================

/// One row of the raw survey catch table: a captured individual or a tally
/// event at a single site visit.
///
/// Immutable input to the pipeline. Every record belongs to exactly one
/// (waterbody, site, year, season) visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCatchRecord {
    /// Waterbody the site belongs to (e.g. "Lake Ripley")
    pub waterbody: String,

    /// Site identifier within the waterbody
    pub site: String,

    /// Survey year, already derived by the upstream summarization step
    pub year: i32,

    /// Survey season (e.g. "Spring", "Fall")
    pub season: String,

    /// Canonical species code (e.g. "BLG")
    pub species_code: String,

    /// Common species name (e.g. "Bluegill")
    pub species_common: String,

    /// Scientific species name (e.g. "Lepomis macrochirus")
    pub species_scientific: String,

    /// Total length in whole-cm bins; absent for tally-only records
    pub length_cm: Option<f64>,

    /// Number of individuals this row represents (>= 0)
    pub count: f64,

    /// Sampling effort in minutes; constant within a visit, may be missing
    pub effort_minutes: Option<f64>,
}

impl RawCatchRecord {
    /// Key of the visit this record belongs to
    pub fn visit_key(&self) -> VisitKey {
        VisitKey {
            waterbody: self.waterbody.clone(),
            site: self.site.clone(),
            year: self.year,
            season: self.season.clone(),
        }
    }
}

// =============================================================================
// Visits
// =============================================================================

/// The unit of sampling: one visit to a site, in a season and year, with one
/// effort value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VisitKey {
    pub waterbody: String,
    pub site: String,
    pub year: i32,
    pub season: String,
}

// =============================================================================
// Species lookup
// =============================================================================

/// Common and scientific names of a species code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesNames {
    pub common: String,
    pub scientific: String,
}

/// Code -> names lookup, built once per dataset.
///
/// Code is the unique key; the first record seen for a code supplies the
/// names. Distinct records with the same code are assumed to agree on names
/// (a caller data-quality concern, not enforced here).
pub type SpeciesLookup = BTreeMap<String, SpeciesNames>;

// =============================================================================
// Per-sample CPUE
// =============================================================================

/// One per-visit, per-species, per-stratum sample after zero-fill expansion.
///
/// Intermediate value between the zero-fill and grouping stages: a visit at
/// which the species/stratum was not observed carries an explicit zero count
/// rather than being absent.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleCpue {
    pub visit: VisitKey,
    pub species_code: String,
    pub stratum: String,

    /// Summed count over the visit for this species/stratum
    pub count: f64,

    /// Visit effort in hours; NaN when every effort reading was missing
    pub effort_hours: f64,

    /// count / effort_hours; NaN propagates from missing effort
    pub cpue: f64,
}

// =============================================================================
// Aggregate output
// =============================================================================

/// One row of the terminal output table: descriptive CPUE statistics for a
/// (waterbody, year, season, species, stratum) group across its site visits.
///
/// `n` is always >= 1: visits with zero observed individuals contribute a
/// CPUE of 0, not an absent row. `sd`/`se`/`cv` are NaN for n = 1 groups and
/// `cv` is NaN when the mean is 0; NaN is valid output signaling insufficient
/// data, and callers must handle it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub waterbody: String,
    pub year: i32,
    pub season: String,
    pub species_code: String,
    pub species_common: String,
    pub species_scientific: String,
    pub stratum: String,

    /// Number of site visits in the group
    pub n: usize,

    pub mean_cpue: f64,
    pub sd_cpue: f64,
    pub se_cpue: f64,
    pub min_cpue: f64,
    pub max_cpue: f64,
    pub cv_cpue: f64,

    /// mean - 2 * se
    pub lower_cpue: f64,

    /// mean + 2 * se
    pub upper_cpue: f64,
}

impl AggregateRow {
    /// Full group key, used for deterministic output ordering
    pub fn sort_key(&self) -> (&str, i32, &str, &str, &str) {
        (
            &self.waterbody,
            self.year,
            &self.season,
            &self.species_code,
            &self.stratum,
        )
    }
}

// =============================================================================
// Historical baseline envelope
// =============================================================================

/// One row of the historical baseline envelope table: the long-run quartiles
/// of mean CPUE for a (waterbody, season, species, stratum) group, broadcast
/// across a display year so a flat envelope can be overlaid on the time
/// series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineRow {
    pub waterbody: String,
    pub year: i32,
    pub season: String,
    pub species_code: String,
    pub species_common: String,
    pub species_scientific: String,
    pub stratum: String,

    /// 25th percentile of mean CPUE across years
    pub q25_cpue: f64,

    /// Median of mean CPUE across years
    pub median_cpue: f64,

    /// 75th percentile of mean CPUE across years
    pub q75_cpue: f64,
}
