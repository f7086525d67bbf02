//! Canonical reference-range segment.
//!
//! One segment is one row of a parameter's reference table, scoped to a
//! patient sex and an age band. Serde field names are the wire dialect
//! (`sex`, `age_min`, ...) so a consolidated list is itself valid
//! normalizer input.

use serde::{Deserialize, Serialize};

use crate::enums::{AgeUnit, Sex};

/// Marker stored in `notes` on synthesized placeholder segments.
pub const PLACEHOLDER_NOTE: &str = "Sin referencia establecida";

/// Full adult life span covered by a consolidated parameter, in years.
pub const MAX_AGE_YEARS: f64 = 120.0;

/// One reference-range row for a parameter.
///
/// A segment is either numeric-flavored (`lower`/`upper` meaningful),
/// text-flavored (`text_value` set), or a placeholder carrying neither,
/// inserted purely to guarantee full age coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRangeSegment {
    /// Sex scope; `Ambos` applies to any patient.
    #[serde(default)]
    pub sex: Sex,
    /// Inclusive lower age bound; `None` means unbounded below.
    #[serde(default)]
    pub age_min: Option<f64>,
    /// Inclusive upper age bound; `None` means unbounded above.
    #[serde(default)]
    pub age_max: Option<f64>,
    /// Unit both age bounds are expressed in. Kept as the raw token so the
    /// validator can reject units outside the canonical three; use
    /// [`ReferenceRangeSegment::age_unit`] for the parsed form.
    #[serde(default = "default_age_unit")]
    pub age_min_unit: String,
    /// Inclusive numeric lower bound; `None` means open below.
    #[serde(default)]
    pub lower: Option<f64>,
    /// Inclusive numeric upper bound; `None` means open above.
    #[serde(default)]
    pub upper: Option<f64>,
    /// Categorical/free-text expected value; when set the segment is
    /// text-flavored and the numeric bounds are not meaningful.
    #[serde(default)]
    pub text_value: Option<String>,
    /// Free annotation; [`PLACEHOLDER_NOTE`] marks synthesized segments.
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_age_unit() -> String {
    AgeUnit::Years.as_str().to_string()
}

impl Default for ReferenceRangeSegment {
    fn default() -> Self {
        Self {
            sex: Sex::Ambos,
            age_min: None,
            age_max: None,
            age_min_unit: default_age_unit(),
            lower: None,
            upper: None,
            text_value: None,
            notes: None,
        }
    }
}

impl ReferenceRangeSegment {
    /// A numeric-flavored segment with no age bounds.
    pub fn numeric(sex: Sex, lower: Option<f64>, upper: Option<f64>) -> Self {
        Self {
            sex,
            lower,
            upper,
            ..Self::default()
        }
    }

    /// A text-flavored segment with no age bounds.
    pub fn text(sex: Sex, text_value: &str) -> Self {
        Self {
            sex,
            text_value: Some(text_value.to_string()),
            ..Self::default()
        }
    }

    /// A synthesized coverage placeholder over `[age_min, age_max]` years.
    pub fn placeholder(sex: Sex, age_min: f64, age_max: f64) -> Self {
        Self {
            sex,
            age_min: Some(age_min),
            age_max: Some(age_max),
            notes: Some(PLACEHOLDER_NOTE.to_string()),
            ..Self::default()
        }
    }

    /// Set both age bounds and their unit token.
    #[must_use]
    pub fn with_ages(mut self, age_min: Option<f64>, age_max: Option<f64>, unit: &str) -> Self {
        self.age_min = age_min;
        self.age_max = age_max;
        self.age_min_unit = unit.to_string();
        self
    }

    /// Set the free-text note.
    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// The parsed age unit, or `None` when the stored token is not one of
    /// the three canonical units.
    pub fn age_unit(&self) -> Option<AgeUnit> {
        self.age_min_unit.parse().ok()
    }

    /// True when the segment carries a numeric bound or a text value.
    pub fn has_value(&self) -> bool {
        self.lower.is_some() || self.upper.is_some() || self.text_value.is_some()
    }

    /// True when the segment is a synthesized coverage placeholder.
    pub fn is_placeholder(&self) -> bool {
        !self.has_value()
    }

    /// Lower age bound in years-equivalent, treating `None` as 0.
    ///
    /// An unparsable unit falls back to years; evaluation-time code must
    /// degrade rather than fail on dirty persisted data.
    pub fn age_min_years(&self) -> f64 {
        let unit = self.age_unit().unwrap_or_default();
        self.age_min.map_or(0.0, |v| v / unit.per_year())
    }

    /// Upper age bound in years-equivalent, treating `None` as [`MAX_AGE_YEARS`].
    pub fn age_max_years(&self) -> f64 {
        let unit = self.age_unit().unwrap_or_default();
        self.age_max
            .map_or(MAX_AGE_YEARS, |v| v / unit.per_year())
    }

    /// True when `age` (expressed in this segment's own unit) falls inside
    /// `[age_min, age_max]`, unbounded sides treated as infinite.
    pub fn age_applies(&self, age_in_unit: f64) -> bool {
        let above_min = self.age_min.is_none_or(|min| age_in_unit >= min);
        let below_max = self.age_max.is_none_or(|max| age_in_unit <= max);
        above_min && below_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_bounds_in_years_equivalent() {
        let months = ReferenceRangeSegment::numeric(Sex::Ambos, Some(1.0), Some(2.0)).with_ages(
            Some(0.0),
            Some(6.0),
            "meses",
        );
        assert!((months.age_max_years() - 0.5).abs() < 1e-9);

        let open = ReferenceRangeSegment::numeric(Sex::Ambos, Some(1.0), Some(2.0));
        assert_eq!(open.age_min_years(), 0.0);
        assert_eq!(open.age_max_years(), MAX_AGE_YEARS);
    }

    #[test]
    fn age_applies_is_inclusive() {
        let segment = ReferenceRangeSegment::numeric(Sex::Ambos, None, None).with_ages(
            Some(18.0),
            Some(65.0),
            "años",
        );
        assert!(segment.age_applies(18.0));
        assert!(segment.age_applies(65.0));
        assert!(!segment.age_applies(17.9));
        assert!(!segment.age_applies(65.1));
    }

    #[test]
    fn unknown_unit_degrades_to_years() {
        let segment = ReferenceRangeSegment::numeric(Sex::Ambos, Some(1.0), Some(2.0)).with_ages(
            Some(10.0),
            Some(20.0),
            "semanas",
        );
        assert_eq!(segment.age_unit(), None);
        assert_eq!(segment.age_min_years(), 10.0);
    }
}
