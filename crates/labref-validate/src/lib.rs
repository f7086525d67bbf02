//! Structural validation of reference-range segments.
//!
//! Validation runs at save time only. The two structural checks are an
//! inverted numeric interval and an age unit outside the canonical three.
//! Evaluation and display never validate; malformed persisted data must
//! degrade gracefully there instead.

use serde::Serialize;
use tracing::debug;

use labref_model::{Parameter, RangeError, RangeErrorKind, ReferenceRangeSegment, Result};

/// All structural issues found across one parameter's segment list.
///
/// Collected exhaustively so form UIs can mark every offending row; save
/// flows use [`validate_for_save`] instead, which is fail-fast.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<RangeError>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues.len()
    }
}

/// Validate one parameter's segments, indexing issues by their position in
/// the owning list.
pub fn validate_segments(param_index: usize, segments: &[ReferenceRangeSegment]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (range_index, segment) in segments.iter().enumerate() {
        if let (Some(lower), Some(upper)) = (segment.lower, segment.upper)
            && lower > upper
        {
            report.issues.push(RangeError::structural(
                RangeErrorKind::InvalidInterval,
                param_index,
                range_index,
                format!("lower {} exceeds upper {}", lower, upper),
            ));
        }
        if segment.age_unit().is_none() {
            report.issues.push(RangeError::structural(
                RangeErrorKind::InvalidAgeUnit,
                param_index,
                range_index,
                format!("unrecognized age unit '{}'", segment.age_min_unit),
            ));
        }
    }
    debug!(
        param_index,
        segments = segments.len(),
        issues = report.error_count(),
        "validated segment list"
    );
    report
}

/// Gate a batch save: the first structural error anywhere aborts the whole
/// save, naming the offending parameter and range. No partial save occurs.
pub fn validate_for_save(parameters: &[Parameter]) -> Result<()> {
    for (param_index, parameter) in parameters.iter().enumerate() {
        let report = validate_segments(param_index, &parameter.reference_ranges);
        if let Some(first) = report.issues.into_iter().next() {
            return Err(first);
        }
    }
    Ok(())
}
