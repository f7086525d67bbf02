//! Reference-range consolidation.
//!
//! Turns a parameter's raw candidate segments into the minimal canonical
//! set that is persisted: grouped by sex, merged where compatible, padded
//! with placeholders until every sex group covers the full life span, and
//! with unisex segments dropped where sex-specific ones take over.
//!
//! The pass is pure and idempotent: re-running it on its own output returns
//! the same set, which lets save flows call it speculatively.

mod stages;

use tracing::debug;

use labref_model::{Parameter, ReferenceRangeSegment, Result, Sex, segment::MAX_AGE_YEARS};
use labref_validate::validate_for_save;

use crate::stages::{gap_fill, group_by_sex, merge_compatible, shadow_unisex, sort_output};

/// Canonical life-stage bands used for synthesized placeholders, in years:
/// infant, toddler, child, adolescent, adult, senior.
pub const LIFE_STAGES: &[(f64, f64)] = &[
    (0.0, 1.0),
    (1.0, 2.0),
    (2.0, 12.0),
    (12.0, 18.0),
    (18.0, 65.0),
    (65.0, MAX_AGE_YEARS),
];

/// The six unisex placeholders emitted for a parameter with no real values.
pub fn default_placeholders() -> Vec<ReferenceRangeSegment> {
    LIFE_STAGES
        .iter()
        .map(|&(min, max)| ReferenceRangeSegment::placeholder(Sex::Ambos, min, max))
        .collect()
}

/// Consolidate a parameter's segments into the canonical persisted set.
///
/// Pipeline: group by sex → sort by lower age bound → merge compatible
/// contiguous runs → placeholder synthesis / gap-fill to `[0, 120]` years →
/// unisex shadowing below the earliest sex-specific onset → deterministic
/// output ordering with exact duplicates removed.
///
/// A parameter whose segments carry no numeric or text value anywhere is
/// replaced wholesale by [`default_placeholders`]. When real values exist,
/// a sex group that itself carries none contributes nothing; coverage for
/// that group is noise, and the valued groups are gap-filled independently.
pub fn consolidate(segments: &[ReferenceRangeSegment]) -> Vec<ReferenceRangeSegment> {
    if !segments.iter().any(ReferenceRangeSegment::has_value) {
        return default_placeholders();
    }

    let mut output = Vec::new();
    for (sex, group) in group_by_sex(segments) {
        let merged = merge_compatible(group);
        if !merged.iter().any(ReferenceRangeSegment::has_value) {
            debug!(sex = %sex, "dropping value-less sex group");
            continue;
        }
        output.extend(gap_fill(sex, merged));
    }

    let mut output = shadow_unisex(output);
    sort_output(&mut output);
    output.dedup();
    output
}

/// Prepare a batch of parameters for a full-list-replace save.
///
/// Fail-fast: the first structural error anywhere aborts the whole batch,
/// naming the offending parameter and range; no partial result is returned.
/// On success every parameter's reference list is the consolidated set the
/// storage collaborator should persist verbatim.
pub fn prepare_parameter_save(parameters: &[Parameter]) -> Result<Vec<Parameter>> {
    validate_for_save(parameters)?;
    Ok(parameters
        .iter()
        .map(|parameter| {
            let mut prepared = parameter.clone();
            prepared.reference_ranges = consolidate(&parameter.reference_ranges);
            prepared
        })
        .collect())
}
