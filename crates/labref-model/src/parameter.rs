//! Clinical parameter owning an ordered reference-range list.

use serde::{Deserialize, Serialize};

use crate::segment::ReferenceRangeSegment;

/// A measurable clinical parameter of a diagnostic study.
///
/// Reference ranges are replaced as a whole batch on every save; nothing
/// ever patches a single segment in place, so the list here is always the
/// complete canonical set for the parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Measurement unit as printed on reports (e.g. `mg/dL`).
    #[serde(default)]
    pub unit: String,
    /// Decimal places used when rendering numeric results.
    #[serde(default)]
    pub decimal_places: Option<u32>,
    /// Display order within the owning study.
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub reference_ranges: Vec<ReferenceRangeSegment>,
}

impl Parameter {
    pub fn new(name: &str, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: unit.to_string(),
            decimal_places: None,
            position: 0,
            reference_ranges: Vec::new(),
        }
    }

    /// Replace the full reference-range list.
    #[must_use]
    pub fn with_reference_ranges(mut self, ranges: Vec<ReferenceRangeSegment>) -> Self {
        self.reference_ranges = ranges;
        self
    }
}
