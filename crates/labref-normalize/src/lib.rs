//! Producer-dialect normalization.
//!
//! Three producers feed candidate reference ranges into the engine, each
//! with its own historically-accumulated field names:
//!
//! - the manual-entry form (`sexo`, `edadMin`, `valorMin`, ...),
//! - the wire/catalog shape (`sex`, `age_min`, `lower`, ...),
//! - the external generator, a loose superset with stray `gender`,
//!   `min`, `max`, and `age_unit` aliases.
//!
//! All alias knowledge lives here. The rest of the engine only ever sees
//! [`ReferenceRangeSegment`]; adding a new producer means adding alias
//! entries, never touching the algorithms.

mod aliases;

use serde_json::Value;
use tracing::debug;

use labref_model::{AgeUnit, ReferenceRangeSegment, Sex};

use crate::aliases::{
    AGE_MAX_ALIASES, AGE_MIN_ALIASES, AGE_UNIT_ALIASES, LOWER_ALIASES, NOTES_ALIASES, SEX_ALIASES,
    TEXT_ALIASES, UPPER_ALIASES,
};

/// Map one raw producer record into the canonical segment shape.
///
/// Per field, each known alias is tried in a fixed priority order and the
/// first present (non-null) value wins. Missing or unrecognized sex falls
/// back to `Ambos` and a missing age unit to `años`; an unrecognized age
/// unit token is passed through unchanged for the validator to reject.
pub fn normalize_segment(raw: &Value) -> ReferenceRangeSegment {
    let sex = match first_string(raw, SEX_ALIASES) {
        Some(token) => Sex::normalize(&token),
        None => Sex::Ambos,
    };

    let age_min_unit = match first_string(raw, AGE_UNIT_ALIASES) {
        Some(token) => match AgeUnit::from_synonym(&token) {
            Some(unit) => unit.as_str().to_string(),
            None => {
                debug!(token = %token, "age unit outside synonym table, passing through");
                token
            }
        },
        None => AgeUnit::Years.as_str().to_string(),
    };

    ReferenceRangeSegment {
        sex,
        age_min: first_number(raw, AGE_MIN_ALIASES),
        age_max: first_number(raw, AGE_MAX_ALIASES),
        age_min_unit,
        lower: first_number(raw, LOWER_ALIASES),
        upper: first_number(raw, UPPER_ALIASES),
        text_value: first_string(raw, TEXT_ALIASES).filter(|s| !s.is_empty()),
        notes: first_string(raw, NOTES_ALIASES).filter(|s| !s.is_empty()),
    }
}

/// Normalize a whole candidate batch, preserving input order.
pub fn normalize_segments(raws: &[Value]) -> Vec<ReferenceRangeSegment> {
    raws.iter().map(normalize_segment).collect()
}

/// First alias present on `raw` with a non-null value, as a trimmed string.
fn first_string(raw: &Value, aliases: &[&str]) -> Option<String> {
    for &alias in aliases {
        match raw.get(alias) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) => return Some(s.trim().to_string()),
            Some(other) => return Some(other.to_string()),
        }
    }
    None
}

/// First alias present on `raw` carrying a usable number.
///
/// Producers send numbers both as JSON numbers and as numeric strings;
/// anything else present but unparsable counts as absent.
fn first_number(raw: &Value, aliases: &[&str]) -> Option<f64> {
    for &alias in aliases {
        match raw.get(alias) {
            None | Some(Value::Null) => continue,
            Some(Value::Number(n)) => return n.as_f64(),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<f64>() {
                    Ok(v) => return Some(v),
                    Err(_) => {
                        debug!(alias, value = %s, "non-numeric value for numeric field, ignoring");
                        return None;
                    }
                }
            }
            Some(_) => return None,
        }
    }
    None
}
