//! The individual consolidation passes.
//!
//! Each stage is a pure slice-in/vec-out function; `lib.rs` composes them.
//! Age comparisons across mixed units happen in years-equivalent; stored
//! bounds keep their original unit and `None` sides.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use labref_model::{ReferenceRangeSegment, Sex, segment::MAX_AGE_YEARS};

/// Tolerance for years-equivalent coverage arithmetic. Bounds converted
/// from months or days are not exactly representable.
const COVERAGE_EPSILON: f64 = 1e-9;

/// Group segments by sex, each group sorted ascending by lower age bound
/// (`None` ordering as negative infinity).
///
/// Inverted age bounds are swapped here: save-time validation only gates
/// the numeric interval, so `age_min > age_max` can reach this point and
/// every later stage assumes ordered intervals.
pub(crate) fn group_by_sex(
    segments: &[ReferenceRangeSegment],
) -> BTreeMap<Sex, Vec<ReferenceRangeSegment>> {
    let mut groups: BTreeMap<Sex, Vec<ReferenceRangeSegment>> = BTreeMap::new();
    for segment in segments {
        let mut segment = segment.clone();
        if let (Some(min), Some(max)) = (segment.age_min, segment.age_max)
            && min > max
        {
            debug!(sex = %segment.sex, min, max, "swapping inverted age bounds");
            segment.age_min = Some(max);
            segment.age_max = Some(min);
        }
        groups.entry(segment.sex).or_default().push(segment);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| sort_start(a).total_cmp(&sort_start(b)));
    }
    groups
}

fn sort_start(segment: &ReferenceRangeSegment) -> f64 {
    match segment.age_min {
        None => f64::NEG_INFINITY,
        Some(_) => segment.age_min_years(),
    }
}

/// Collapse runs of compatible contiguous segments into one.
///
/// Two consecutive segments are compatible when they carry identical
/// values, notes, and age unit; contiguous when the earlier one's upper
/// age bound reaches the later one's lower bound (an unbounded side always
/// touches). The merged segment keeps the earlier lower bound and the
/// later of the two upper bounds, unbounded winning.
pub(crate) fn merge_compatible(group: Vec<ReferenceRangeSegment>) -> Vec<ReferenceRangeSegment> {
    let mut merged: Vec<ReferenceRangeSegment> = Vec::with_capacity(group.len());
    for segment in group {
        if let Some(last) = merged.last_mut()
            && compatible(last, &segment)
            && contiguous(last, &segment)
        {
            trace!(sex = %segment.sex, "merging contiguous compatible segment");
            last.age_max = later_upper_bound(last.age_max, segment.age_max);
            continue;
        }
        merged.push(segment);
    }
    merged
}

fn compatible(a: &ReferenceRangeSegment, b: &ReferenceRangeSegment) -> bool {
    a.text_value == b.text_value
        && a.lower == b.lower
        && a.upper == b.upper
        && a.notes == b.notes
        && a.age_min_unit == b.age_min_unit
}

fn contiguous(earlier: &ReferenceRangeSegment, later: &ReferenceRangeSegment) -> bool {
    match (earlier.age_max, later.age_min) {
        (None, _) | (_, None) => true,
        (Some(end), Some(start)) => end >= start,
    }
}

fn later_upper_bound(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (None, _) | (_, None) => None,
        (Some(x), Some(y)) => Some(x.max(y)),
    }
}

/// Insert placeholders until the group covers `[0, 120]` years.
///
/// Walks age ascending with a coverage cursor; unbounded edges count as
/// 0/120 for this step only, the stored bounds are untouched. Synthesized
/// placeholders carry the group's sex and are expressed in years.
pub(crate) fn gap_fill(
    sex: Sex,
    group: Vec<ReferenceRangeSegment>,
) -> Vec<ReferenceRangeSegment> {
    let mut filled = Vec::with_capacity(group.len() + 2);
    let mut cursor = 0.0_f64;
    for segment in group {
        let start = segment.age_min_years();
        let end = segment.age_max_years();
        if start > cursor + COVERAGE_EPSILON {
            debug!(sex = %sex, from = cursor, to = start, "filling age coverage gap");
            filled.push(ReferenceRangeSegment::placeholder(sex, cursor, start));
        }
        if end > cursor {
            cursor = end;
        }
        filled.push(segment);
    }
    if cursor + COVERAGE_EPSILON < MAX_AGE_YEARS {
        debug!(sex = %sex, from = cursor, "filling trailing age coverage gap");
        filled.push(ReferenceRangeSegment::placeholder(sex, cursor, MAX_AGE_YEARS));
    }
    filled
}

/// Drop or truncate unisex segments shadowed by sex-specific ones.
///
/// The cutoff is the earliest lower age bound of any value-carrying
/// sex-specific segment (placeholders synthesized for a sex group do not
/// count, or they would pull the cutoff to zero). A unisex segment keeps
/// only the portion of its span strictly below that cutoff.
pub(crate) fn shadow_unisex(segments: Vec<ReferenceRangeSegment>) -> Vec<ReferenceRangeSegment> {
    let cutoff = segments
        .iter()
        .filter(|s| s.sex != Sex::Ambos && s.has_value())
        .map(ReferenceRangeSegment::age_min_years)
        .min_by(f64::total_cmp);
    let Some(cutoff) = cutoff else {
        return segments;
    };

    segments
        .into_iter()
        .filter_map(|mut segment| {
            if segment.sex != Sex::Ambos {
                return Some(segment);
            }
            if segment.age_min_years() >= cutoff - COVERAGE_EPSILON {
                debug!(cutoff, "dropping unisex segment shadowed by sex-specific ranges");
                return None;
            }
            if segment.age_max_years() > cutoff + COVERAGE_EPSILON {
                let unit = segment.age_unit().unwrap_or_default();
                segment.age_max = Some(cutoff * unit.per_year());
            }
            Some(segment)
        })
        .collect()
}

/// Deterministic output ordering: lower age bound, then upper, then sex
/// name, all in years-equivalent. Stable for testing and diffing.
pub(crate) fn sort_output(segments: &mut [ReferenceRangeSegment]) {
    segments.sort_by(|a, b| {
        sort_start(a)
            .total_cmp(&sort_start(b))
            .then_with(|| a.age_max_years().total_cmp(&b.age_max_years()))
            .then_with(|| a.sex.as_str().cmp(b.sex.as_str()))
    });
}
