//! Segment resolution for a specific patient.

use tracing::{debug, warn};

use labref_model::{PatientAgeData, ReferenceRangeSegment, Sex};

/// Pick the single segment applicable to a patient.
///
/// A segment qualifies when its sex matches the patient's (or is `Ambos`)
/// and the patient's age, read in the segment's own unit, falls inside
/// `[age_min, age_max]` inclusive, unbounded sides open. Sex-exact
/// candidates outrank `Ambos` ones; among several sex-exact matches the
/// first in input order wins and the ambiguity is logged for operational
/// visibility, not raised.
pub fn resolve<'a>(
    segments: &'a [ReferenceRangeSegment],
    patient_sex: Sex,
    age: &PatientAgeData,
) -> Option<&'a ReferenceRangeSegment> {
    let candidates: Vec<&ReferenceRangeSegment> = segments
        .iter()
        .filter(|segment| {
            (segment.sex == patient_sex || segment.sex == Sex::Ambos) && age_matches(segment, age)
        })
        .collect();

    let exact: Vec<&&ReferenceRangeSegment> = candidates
        .iter()
        .filter(|segment| segment.sex == patient_sex)
        .collect();

    if exact.len() > 1 {
        warn!(
            patient_sex = %patient_sex,
            matches = exact.len(),
            "ambiguous reference-range resolution, using first match in input order"
        );
    }
    if let Some(first) = exact.first() {
        return Some(**first);
    }

    let fallback = candidates.first().copied();
    if fallback.is_none() {
        debug!(patient_sex = %patient_sex, "no reference range applies to patient");
    }
    fallback
}

/// Age comparison in the segment's own unit. An unrecognized persisted
/// unit degrades to years rather than failing at report time.
fn age_matches(segment: &ReferenceRangeSegment, age: &PatientAgeData) -> bool {
    let unit = segment.age_unit().unwrap_or_default();
    segment.age_applies(age.value_in(unit))
}
