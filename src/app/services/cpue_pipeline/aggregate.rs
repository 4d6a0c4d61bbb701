//! Core CPUE aggregation
//!
//! Computes per-sample CPUE and aggregates it to descriptive statistics per
//! (waterbody, year, season, species, stratum) group. Two parallel pipelines
//! run over the same visit set and are unioned into one table:
//!
//! - the **stratified** pipeline groups records by their assigned size
//!   stratum, supporting size-class breakdowns;
//! - the **unstratified** pipeline forces every record into the single
//!   "All_Sizes" stratum, giving an overall trend line unaffected by
//!   stratification choices.
//!
//! The duplication is intentional: both views must be independently
//! retrievable from the same call.

use crate::app::models::{AggregateRow, RawCatchRecord, SampleCpue, SpeciesLookup, VisitKey};
use crate::config::StrataSpec;
use crate::constants::ALL_SIZES_STRATUM;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use super::stratify::assign_stratum;
use super::zero_fill::{ObservedCounts, SpeciesStrataCombos, expand_zero_filled};

/// Row and record counters from one aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationCounts {
    /// Expanded per-sample rows in the stratified pipeline
    pub stratified_samples: usize,
    /// Expanded per-sample rows in the unstratified pipeline
    pub unstratified_samples: usize,
    /// Records of a spec'd species whose length matched no declared range
    /// (excluded from the stratified pipeline only)
    pub unassigned_length_records: usize,
}

/// How records are bucketed before grouping.
enum StratifyMode<'a> {
    /// Assign strata from the specification; unassignable records are skipped
    Stratified(Option<&'a StrataSpec>),
    /// Every record falls in the single "All_Sizes" stratum
    Unstratified,
}

/// Run both aggregation pipelines and union their output.
///
/// `visit_efforts` must cover every visit of the filtered dataset, including
/// visits that recorded none of the resolved species; those visits are what
/// the zero-fill stage turns into explicit zero-CPUE samples. The returned
/// rows are sorted by their full group key, so repeated runs over the same
/// input are bit-identical.
///
/// Confidence bounds are not filled in here; see the confidence module.
pub fn aggregate_cpue(
    records: &[RawCatchRecord],
    resolved_species: &BTreeSet<String>,
    visit_efforts: &BTreeMap<VisitKey, f64>,
    strata: Option<&StrataSpec>,
    lookup: &SpeciesLookup,
) -> (Vec<AggregateRow>, AggregationCounts) {
    let mut counts = AggregationCounts::default();

    // Stratified pipeline
    let (observed, combos, unassigned) =
        group_observed(records, resolved_species, StratifyMode::Stratified(strata));
    counts.unassigned_length_records = unassigned;
    let stratified = expand_zero_filled(visit_efforts, &observed, &combos, strata);
    counts.stratified_samples = stratified.len();

    // Unstratified pipeline: identical, with the stratum forced
    let (observed, combos, _) = group_observed(records, resolved_species, StratifyMode::Unstratified);
    let unstratified = expand_zero_filled(visit_efforts, &observed, &combos, strata);
    counts.unstratified_samples = unstratified.len();

    let mut rows = summarize_samples(&stratified, lookup);
    rows.extend(summarize_samples(&unstratified, lookup));
    rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    info!(
        "Aggregated {} stratified and {} unstratified samples into {} rows",
        counts.stratified_samples,
        counts.unstratified_samples,
        rows.len()
    );

    (rows, counts)
}

/// Group raw records of the resolved species by (visit, species, stratum),
/// summing counts, and collect the observed (species, stratum) combinations.
fn group_observed(
    records: &[RawCatchRecord],
    resolved_species: &BTreeSet<String>,
    mode: StratifyMode<'_>,
) -> (ObservedCounts, SpeciesStrataCombos, usize) {
    let mut observed = ObservedCounts::new();
    let mut combos = SpeciesStrataCombos::new();
    let mut unassigned = 0usize;

    for record in records {
        if !resolved_species.contains(&record.species_code) {
            continue;
        }

        let stratum = match &mode {
            StratifyMode::Unstratified => ALL_SIZES_STRATUM.to_string(),
            StratifyMode::Stratified(strata) => {
                match assign_stratum(*strata, &record.species_code, record.length_cm) {
                    Some(stratum) => stratum,
                    None => {
                        unassigned += 1;
                        continue;
                    }
                }
            }
        };

        combos.insert((record.species_code.clone(), stratum.clone()));
        *observed
            .entry((record.visit_key(), record.species_code.clone(), stratum))
            .or_insert(0.0) += record.count;
    }

    if unassigned > 0 {
        debug!(
            "{} record(s) had lengths outside every declared stratum and were excluded \
             from the stratified aggregate",
            unassigned
        );
    }

    (observed, combos, unassigned)
}

/// Aggregate per-sample CPUE values to one row per (waterbody, year, season,
/// species, stratum) group across its site visits.
pub fn summarize_samples(samples: &[SampleCpue], lookup: &SpeciesLookup) -> Vec<AggregateRow> {
    // Group key: (waterbody, year, season, species, stratum)
    let mut groups: BTreeMap<(String, i32, String, String, String), Vec<f64>> = BTreeMap::new();
    for sample in samples {
        groups
            .entry((
                sample.visit.waterbody.clone(),
                sample.visit.year,
                sample.visit.season.clone(),
                sample.species_code.clone(),
                sample.stratum.clone(),
            ))
            .or_default()
            .push(sample.cpue);
    }

    groups
        .into_iter()
        .map(|((waterbody, year, season, species_code, stratum), cpues)| {
            let stats = DescriptiveStats::of(&cpues);
            let names = lookup.get(&species_code);

            AggregateRow {
                waterbody,
                year,
                season,
                species_common: names.map(|n| n.common.clone()).unwrap_or_default(),
                species_scientific: names.map(|n| n.scientific.clone()).unwrap_or_default(),
                species_code,
                stratum,
                n: stats.n,
                mean_cpue: stats.mean,
                sd_cpue: stats.sd,
                se_cpue: stats.se,
                min_cpue: stats.min,
                max_cpue: stats.max,
                cv_cpue: stats.cv,
                lower_cpue: f64::NAN,
                upper_cpue: f64::NAN,
            }
        })
        .collect()
}

/// Descriptive statistics of a group's per-sample CPUE values.
struct DescriptiveStats {
    n: usize,
    mean: f64,
    sd: f64,
    se: f64,
    min: f64,
    max: f64,
    cv: f64,
}

impl DescriptiveStats {
    /// Compute statistics over a non-empty slice of CPUE values.
    ///
    /// Sample standard deviation (n - 1 denominator); n = 1 groups yield NaN
    /// sd/se/cv, and a zero mean yields NaN cv. A single NaN sample (missing
    /// effort) makes every statistic of its group NaN.
    fn of(values: &[f64]) -> Self {
        let n = values.len();
        debug_assert!(n > 0, "aggregate groups always hold at least one sample");

        if values.iter().any(|v| v.is_nan()) {
            return Self {
                n,
                mean: f64::NAN,
                sd: f64::NAN,
                se: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                cv: f64::NAN,
            };
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        let sd = if n > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };
        let se = sd / (n as f64).sqrt();
        // 0/0 when every sample is zero; NaN is the defined output
        let cv = sd / mean;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            n,
            mean,
            sd,
            se,
            min,
            max,
            cv,
        }
    }
}
