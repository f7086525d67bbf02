//! Error types shared by the reference-range engine.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Machine-readable error code.
///
/// Structural kinds are raised by validation before a save; persistence
/// kinds are surfaced by the storage collaborator after submission. Both
/// carry the same location shape so callers report them uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeErrorKind {
    /// `lower > upper` with both bounds present.
    InvalidInterval,
    /// Age unit outside the canonical three after normalization.
    InvalidAgeUnit,
    /// Storage uniqueness constraint hit on submit.
    DuplicateReferenceRange,
    /// Any other storage constraint failure on submit.
    ReferenceRangeConstraintFail,
}

impl RangeErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeErrorKind::InvalidInterval => "INVALID_INTERVAL",
            RangeErrorKind::InvalidAgeUnit => "INVALID_AGE_UNIT",
            RangeErrorKind::DuplicateReferenceRange => "DUPLICATE_REFERENCE_RANGE",
            RangeErrorKind::ReferenceRangeConstraintFail => "REFERENCE_RANGE_CONSTRAINT_FAIL",
        }
    }
}

impl fmt::Display for RangeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A located reference-range error.
///
/// Indices are `None` when the storage collaborator reports a conflict
/// without location information.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{kind}{}: {detail}", location_suffix(.param_index, .range_index))]
pub struct RangeError {
    pub kind: RangeErrorKind,
    pub param_index: Option<usize>,
    pub range_index: Option<usize>,
    pub detail: String,
}

impl RangeError {
    /// A structural error located at a parameter/range pair.
    pub fn structural(
        kind: RangeErrorKind,
        param_index: usize,
        range_index: usize,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            param_index: Some(param_index),
            range_index: Some(range_index),
            detail: detail.into(),
        }
    }

    /// A persistence conflict, located only when the collaborator says where.
    pub fn persistence(kind: RangeErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            param_index: None,
            range_index: None,
            detail: detail.into(),
        }
    }
}

fn location_suffix(param_index: &Option<usize>, range_index: &Option<usize>) -> String {
    match (param_index, range_index) {
        (Some(p), Some(r)) => format!(" at parameter {}, range {}", p, r),
        (Some(p), None) => format!(" at parameter {}", p),
        _ => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, RangeError>;
