//! Human-readable rendering of a resolved reference range.

use serde::Serialize;

use labref_model::ReferenceRangeSegment;

/// Display strings for a resolved range, consumed verbatim by report
/// rendering and result entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceText {
    /// The range itself, e.g. `"70 - 100 mg/dL"`, `"≤ 5 mg/dL"` or a
    /// categorical value like `"Negativo"`. `"N/A"` when nothing resolved.
    pub value_text: String,
    /// Who the range applies to, e.g. `"(Masculino, 18 - 65 años)"`.
    /// Empty when nothing resolved.
    pub demographics: String,
}

/// Format a floating-point bound without trailing zeros.
pub fn format_numeric(value: f64) -> String {
    let s = format!("{value}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Render the resolved segment for display.
pub fn format_reference_text(
    segment: Option<&ReferenceRangeSegment>,
    unit: &str,
) -> ReferenceText {
    let Some(segment) = segment else {
        return ReferenceText {
            value_text: "N/A".to_string(),
            demographics: String::new(),
        };
    };

    ReferenceText {
        value_text: value_text(segment, unit),
        demographics: demographics(segment),
    }
}

fn value_text(segment: &ReferenceRangeSegment, unit: &str) -> String {
    if let Some(text) = &segment.text_value {
        return text.clone();
    }
    let rendered = match (segment.lower, segment.upper) {
        (Some(lower), Some(upper)) => {
            format!("{} - {}", format_numeric(lower), format_numeric(upper))
        }
        (None, Some(upper)) => format!("≤ {}", format_numeric(upper)),
        (Some(lower), None) => format!("≥ {}", format_numeric(lower)),
        // Placeholder: show its note so the report says why there is no range.
        (None, None) => {
            return segment.notes.clone().unwrap_or_else(|| "N/A".to_string());
        }
    };
    if unit.is_empty() {
        rendered
    } else {
        format!("{rendered} {unit}")
    }
}

fn demographics(segment: &ReferenceRangeSegment) -> String {
    let sex = segment.sex;
    let ages = match (segment.age_min, segment.age_max) {
        (None, None) => "Todas las edades".to_string(),
        (Some(min), Some(max)) => format!(
            "{} - {} {}",
            format_numeric(min),
            format_numeric(max),
            segment.age_min_unit
        ),
        (None, Some(max)) => format!("≤ {} {}", format_numeric(max), segment.age_min_unit),
        (Some(min), None) => format!("≥ {} {}", format_numeric(min), segment.age_min_unit),
    };
    format!("({}, {})", sex.as_str(), ages)
}
