//! Integration tests for the consolidation pipeline.

use labref_consolidate::{LIFE_STAGES, consolidate, default_placeholders};
use labref_model::{ReferenceRangeSegment, Sex, segment::MAX_AGE_YEARS, segment::PLACEHOLDER_NOTE};

fn numeric(sex: Sex, lower: f64, upper: f64, min: f64, max: f64) -> ReferenceRangeSegment {
    ReferenceRangeSegment::numeric(sex, Some(lower), Some(upper)).with_ages(
        Some(min),
        Some(max),
        "años",
    )
}

#[test]
fn empty_parameter_gets_life_stage_placeholders() {
    let result = consolidate(&[]);
    assert_eq!(result, default_placeholders());
    let spans: Vec<(f64, f64)> = result
        .iter()
        .map(|s| (s.age_min.unwrap(), s.age_max.unwrap()))
        .collect();
    assert_eq!(spans, LIFE_STAGES.to_vec());
}

#[test]
fn sex_specific_adult_ranges_get_per_sex_padding() {
    // The supplied 18-65 segments stay unchanged; each sex gains a 0-18 and
    // a 65-120 placeholder.
    let input = vec![
        numeric(Sex::Masculino, 70.0, 100.0, 18.0, 65.0),
        numeric(Sex::Femenino, 65.0, 95.0, 18.0, 65.0),
    ];
    let result = consolidate(&input);
    assert_eq!(result.len(), 6);

    for sex in [Sex::Masculino, Sex::Femenino] {
        let group: Vec<_> = result.iter().filter(|s| s.sex == sex).collect();
        assert_eq!(group.len(), 3);
        assert!(group[0].is_placeholder());
        assert_eq!(group[0].age_min, Some(0.0));
        assert_eq!(group[0].age_max, Some(18.0));
        assert!(group[1].has_value());
        assert_eq!(group[1].age_min, Some(18.0));
        assert_eq!(group[1].age_max, Some(65.0));
        assert!(group[2].is_placeholder());
        assert_eq!(group[2].age_min, Some(65.0));
        assert_eq!(group[2].age_max, Some(MAX_AGE_YEARS));
    }
    let supplied = result
        .iter()
        .find(|s| s.sex == Sex::Masculino && s.has_value())
        .unwrap();
    assert_eq!(supplied.lower, Some(70.0));
    assert_eq!(supplied.upper, Some(100.0));
}

#[test]
fn inverted_age_bounds_are_swapped_before_padding() {
    // Only the numeric interval is gated at save time, so a segment with
    // age_min > age_max can reach consolidation. It must come out ordered,
    // with padding placed around the repaired span rather than the raw one.
    let input = vec![numeric(Sex::Ambos, 70.0, 100.0, 65.0, 18.0)];
    let result = consolidate(&input);

    for segment in &result {
        if let (Some(min), Some(max)) = (segment.age_min, segment.age_max) {
            assert!(min <= max, "inverted output segment: {} > {}", min, max);
        }
    }
    assert_eq!(result.len(), 3);
    assert!(result[0].is_placeholder());
    assert_eq!(result[0].age_max, Some(18.0));
    assert!(result[1].has_value());
    assert_eq!(result[1].age_min, Some(18.0));
    assert_eq!(result[1].age_max, Some(65.0));
    assert!(result[2].is_placeholder());
    assert_eq!(result[2].age_min, Some(65.0));
}

#[test]
fn overlapping_distinct_values_both_survive() {
    // Merging only collapses identical values; differently-valued segments
    // whose spans overlap are both kept, and resolution arbitrates at
    // lookup time. Gap-fill still pads the uncovered tail.
    let input = vec![
        numeric(Sex::Ambos, 1.0, 2.0, 0.0, 30.0),
        numeric(Sex::Ambos, 3.0, 4.0, 10.0, 40.0),
    ];
    let result = consolidate(&input);

    let valued: Vec<_> = result.iter().filter(|s| s.has_value()).collect();
    assert_eq!(valued.len(), 2);
    assert_eq!(valued[0].age_min, Some(0.0));
    assert_eq!(valued[0].age_max, Some(30.0));
    assert_eq!(valued[1].age_min, Some(10.0));
    assert_eq!(valued[1].age_max, Some(40.0));

    let tail = result.last().unwrap();
    assert!(tail.is_placeholder());
    assert_eq!(tail.age_min, Some(40.0));
    assert_eq!(tail.age_max, Some(MAX_AGE_YEARS));
}

#[test]
fn output_order_is_deterministic() {
    let input = vec![
        numeric(Sex::Masculino, 70.0, 100.0, 18.0, 65.0),
        numeric(Sex::Femenino, 65.0, 95.0, 18.0, 65.0),
    ];
    let result = consolidate(&input);
    // Ascending by age, Femenino before Masculino on ties (sex name order).
    assert_eq!(result[0].sex, Sex::Femenino);
    assert_eq!(result[1].sex, Sex::Masculino);
    assert_eq!(result[0].age_min, Some(0.0));
    assert_eq!(result[4].age_min, Some(65.0));

    let reversed: Vec<_> = input.iter().rev().cloned().collect();
    assert_eq!(consolidate(&reversed), result);
}

#[test]
fn duplicate_segments_collapse() {
    let segment = numeric(Sex::Ambos, 70.0, 100.0, 0.0, 120.0);
    let result = consolidate(&[segment.clone(), segment.clone(), segment]);
    assert_eq!(result.len(), 1);
}

#[test]
fn adjacent_identical_segments_merge() {
    let input = vec![
        numeric(Sex::Ambos, 70.0, 100.0, 0.0, 40.0),
        numeric(Sex::Ambos, 70.0, 100.0, 40.0, 120.0),
    ];
    let result = consolidate(&input);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].age_min, Some(0.0));
    assert_eq!(result[0].age_max, Some(120.0));
}

#[test]
fn unisex_kept_only_below_sex_specific_onset() {
    let input = vec![
        numeric(Sex::Ambos, 10.0, 20.0, 0.0, 30.0),
        numeric(Sex::Masculino, 70.0, 100.0, 18.0, 65.0),
    ];
    let result = consolidate(&input);

    let unisex: Vec<_> = result.iter().filter(|s| s.sex == Sex::Ambos).collect();
    assert_eq!(unisex.len(), 1);
    assert_eq!(unisex[0].age_min, Some(0.0));
    assert_eq!(unisex[0].age_max, Some(18.0));

    let male: Vec<_> = result.iter().filter(|s| s.sex == Sex::Masculino).collect();
    assert_eq!(male.len(), 3);
    assert!(male.iter().any(|s| s.has_value()));
}

#[test]
fn text_segments_participate_in_coverage() {
    let input = vec![
        ReferenceRangeSegment::text(Sex::Ambos, "Negativo").with_ages(
            Some(0.0),
            Some(120.0),
            "años",
        ),
    ];
    let result = consolidate(&input);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].text_value.as_deref(), Some("Negativo"));
}

#[test]
fn mixed_units_are_gap_filled_in_years() {
    // A newborn range in months leaves the rest of the life span to pad.
    let input = vec![
        ReferenceRangeSegment::numeric(Sex::Ambos, Some(10.0), Some(16.0)).with_ages(
            Some(0.0),
            Some(6.0),
            "meses",
        ),
        numeric(Sex::Ambos, 12.0, 18.0, 2.0, 120.0),
    ];
    let result = consolidate(&input);
    assert_eq!(result.len(), 3);
    assert_eq!(result[0].age_min_unit, "meses");
    assert!(result[1].is_placeholder());
    assert_eq!(result[1].age_min, Some(0.5));
    assert_eq!(result[1].age_max, Some(2.0));
    assert_eq!(result[1].notes.as_deref(), Some(PLACEHOLDER_NOTE));
}

#[test]
fn unbounded_segment_needs_no_padding() {
    let input = vec![ReferenceRangeSegment::numeric(
        Sex::Ambos,
        Some(70.0),
        Some(100.0),
    )];
    let result = consolidate(&input);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].age_min, None);
    assert_eq!(result[0].age_max, None);
}

#[test]
fn consolidate_is_idempotent_on_scenarios() {
    let scenarios: Vec<Vec<ReferenceRangeSegment>> = vec![
        vec![],
        vec![
            numeric(Sex::Masculino, 70.0, 100.0, 18.0, 65.0),
            numeric(Sex::Femenino, 65.0, 95.0, 18.0, 65.0),
        ],
        vec![
            numeric(Sex::Ambos, 10.0, 20.0, 0.0, 30.0),
            numeric(Sex::Masculino, 70.0, 100.0, 18.0, 65.0),
        ],
        vec![
            ReferenceRangeSegment::numeric(Sex::Ambos, Some(10.0), Some(16.0)).with_ages(
                Some(0.0),
                Some(6.0),
                "meses",
            ),
        ],
    ];
    for input in scenarios {
        let once = consolidate(&input);
        let twice = consolidate(&once);
        assert_eq!(once, twice);
    }
}
