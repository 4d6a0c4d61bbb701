//! Application constants for the CPUE processor.
//!
//! Column names for the input catch table and the output summary tables,
//! reserved stratum labels, and statistical constants used by the
//! aggregation pipeline.

// =============================================================================
// Input catch-table columns (contract with the upstream summarization step)
// =============================================================================

/// Column names of the raw catch table supplied by the caller.
pub mod catch {
    pub const WATERBODY: &str = "WaterBody";
    pub const SITE: &str = "Site";
    pub const YEAR: &str = "Year";
    pub const SEASON: &str = "Season";
    pub const SPECIES_CODE: &str = "SpeciesCode";
    pub const SPECIES_COMMON: &str = "SpeciesCommon";
    pub const SPECIES_SCIENTIFIC: &str = "SpeciesScientific";
    pub const COUNT: &str = "Count";
    pub const EFFORT: &str = "Effort";

    /// Length in whole-cm bins; optional in the input table.
    pub const LENGTH_CM: &str = "TL_CM_Group";

    /// Columns that must be present before any aggregation begins.
    pub const REQUIRED: [&str; 9] = [
        WATERBODY,
        SITE,
        YEAR,
        SEASON,
        SPECIES_CODE,
        SPECIES_COMMON,
        SPECIES_SCIENTIFIC,
        COUNT,
        EFFORT,
    ];
}

// =============================================================================
// Output summary-table columns (contract with the plotting collaborator)
// =============================================================================

/// Column names of the aggregate CPUE table.
pub mod summary {
    pub const WATERBODY: &str = "WaterBody";
    pub const YEAR: &str = "Year";
    pub const SEASON: &str = "Season";
    pub const SPECIES_CODE: &str = "SpeciesCode";
    pub const SPECIES_COMMON: &str = "SpeciesCommon";
    pub const SPECIES_SCIENTIFIC: &str = "SpeciesScientific";
    pub const STRATUM: &str = "Stratum";
    pub const N: &str = "N";
    pub const MEAN_CPUE: &str = "Mean_CPUE";
    pub const SD_CPUE: &str = "SD_CPUE";
    pub const SE_CPUE: &str = "SE_CPUE";
    pub const MIN_CPUE: &str = "Min_CPUE";
    pub const MAX_CPUE: &str = "Max_CPUE";
    pub const CV_CPUE: &str = "CV_CPUE";
    pub const LOWER_CPUE: &str = "Lower_CPUE";
    pub const UPPER_CPUE: &str = "Upper_CPUE";
}

/// Column names of the historical baseline envelope table.
pub mod baseline {
    pub const Q25_CPUE: &str = "Q25_CPUE";
    pub const MEDIAN_CPUE: &str = "Median_CPUE";
    pub const Q75_CPUE: &str = "Q75_CPUE";
}

// =============================================================================
// Stratum labels
// =============================================================================

/// Stratum assigned to every record of a species with no strata specification.
pub const ALL_LENGTHS_STRATUM: &str = "All";

/// Stratum label of the unstratified pipeline; one row per species per visit
/// regardless of size.
pub const ALL_SIZES_STRATUM: &str = "All_Sizes";

// =============================================================================
// Statistical constants
// =============================================================================

/// CPUE is reported per hour; raw effort arrives in minutes.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Confidence bounds are mean ± this multiple of the standard error.
pub const CONFIDENCE_SE_MULTIPLIER: f64 = 2.0;

/// Quantile points of the historical baseline envelope.
pub const BASELINE_QUANTILES: [f64; 3] = [0.25, 0.50, 0.75];
