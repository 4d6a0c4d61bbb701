//! Species resolution for user-supplied identifiers
//!
//! Users may name species by code, common name, or scientific name, and the
//! three schemes are mixed freely in practice. This module builds the
//! code <-> name lookup once per dataset and resolves user tokens to the set
//! of canonical species codes.

use crate::app::models::{RawCatchRecord, SpeciesLookup, SpeciesNames};
use crate::error::{CpueError, Result};
use std::collections::BTreeSet;
use tracing::debug;

/// Build the species lookup table from the raw catch records.
///
/// Code is the unique key; the first record seen for a code supplies the
/// common and scientific names.
pub fn build_species_lookup(records: &[RawCatchRecord]) -> SpeciesLookup {
    let mut lookup = SpeciesLookup::new();
    for record in records {
        lookup
            .entry(record.species_code.clone())
            .or_insert_with(|| SpeciesNames {
                common: record.species_common.clone(),
                scientific: record.species_scientific.clone(),
            });
    }
    lookup
}

/// Resolve user species tokens to canonical species codes.
///
/// A token matches a species if it equals its code, common name, or
/// scientific name (case-sensitive, exact). Tokens matching no species are
/// not an error; the corresponding species is simply absent from all outputs.
///
/// # Errors
///
/// Returns a configuration error if the token list is empty.
pub fn resolve_species_tokens(
    tokens: &[String],
    lookup: &SpeciesLookup,
) -> Result<BTreeSet<String>> {
    if tokens.is_empty() {
        return Err(CpueError::configuration(
            "species token list is empty; at least one code, common name, or scientific name \
             is required",
        ));
    }

    let mut resolved = BTreeSet::new();
    for token in tokens {
        let mut matched = false;
        for (code, names) in lookup {
            if token == code || *token == names.common || *token == names.scientific {
                resolved.insert(code.clone());
                matched = true;
            }
        }
        if !matched {
            debug!("Species token '{}' matched no records in the dataset", token);
        }
    }

    debug!(
        "Resolved {} species token(s) to {} species code(s)",
        tokens.len(),
        resolved.len()
    );

    Ok(resolved)
}
