//! Raw-value classification against a resolved segment.

use labref_model::{EvaluationStatus, ReferenceRangeSegment};

/// Parse a reported result as a number, `None` for empty or non-numeric
/// input.
pub fn parse_result_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Classify a raw result value against the resolved segment.
///
/// Bounds are inclusive: a value exactly at `lower` or `upper` is normal.
/// A text-flavored segment always classifies as normal; the raw text is
/// deliberately not compared against `text_value` (observed behavior,
/// pending confirmation with the domain owner). Never fails: no segment
/// means `no-evaluable`, an unparsable value `no-numerico`.
pub fn evaluate(raw_value: &str, segment: Option<&ReferenceRangeSegment>) -> EvaluationStatus {
    let Some(segment) = segment else {
        return EvaluationStatus::NoEvaluable;
    };
    if segment.text_value.is_some() {
        return EvaluationStatus::Normal;
    }
    let Some(value) = parse_result_value(raw_value) else {
        return EvaluationStatus::NoNumerico;
    };
    if let Some(lower) = segment.lower
        && value < lower
    {
        return EvaluationStatus::Bajo;
    }
    if let Some(upper) = segment.upper
        && value > upper
    {
        return EvaluationStatus::Alto;
    }
    EvaluationStatus::Normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use labref_model::Sex;

    fn range(lower: f64, upper: f64) -> ReferenceRangeSegment {
        ReferenceRangeSegment::numeric(Sex::Ambos, Some(lower), Some(upper))
    }

    #[test]
    fn classifies_against_bounds() {
        let segment = range(70.0, 100.0);
        assert_eq!(evaluate("85", Some(&segment)), EvaluationStatus::Normal);
        assert_eq!(evaluate("69.9", Some(&segment)), EvaluationStatus::Bajo);
        assert_eq!(evaluate("101", Some(&segment)), EvaluationStatus::Alto);
    }

    #[test]
    fn bounds_are_inclusive() {
        let segment = range(70.0, 100.0);
        assert_eq!(evaluate("70", Some(&segment)), EvaluationStatus::Normal);
        assert_eq!(evaluate("100", Some(&segment)), EvaluationStatus::Normal);
    }

    #[test]
    fn non_numeric_input() {
        let segment = range(70.0, 100.0);
        assert_eq!(evaluate("abc", Some(&segment)), EvaluationStatus::NoNumerico);
        assert_eq!(evaluate("", Some(&segment)), EvaluationStatus::NoNumerico);
        assert_eq!(evaluate("  ", Some(&segment)), EvaluationStatus::NoNumerico);
    }

    #[test]
    fn missing_segment_is_not_evaluable() {
        assert_eq!(evaluate("85", None), EvaluationStatus::NoEvaluable);
    }

    #[test]
    fn text_segment_is_always_normal() {
        let segment = ReferenceRangeSegment::text(Sex::Ambos, "Negativo");
        assert_eq!(evaluate("Negativo", Some(&segment)), EvaluationStatus::Normal);
        assert_eq!(evaluate("Positivo", Some(&segment)), EvaluationStatus::Normal);
        assert_eq!(evaluate("123", Some(&segment)), EvaluationStatus::Normal);
    }

    #[test]
    fn open_sided_ranges() {
        let below_only = ReferenceRangeSegment::numeric(Sex::Ambos, None, Some(5.0));
        assert_eq!(evaluate("4", Some(&below_only)), EvaluationStatus::Normal);
        assert_eq!(evaluate("6", Some(&below_only)), EvaluationStatus::Alto);

        let above_only = ReferenceRangeSegment::numeric(Sex::Ambos, Some(5.0), None);
        assert_eq!(evaluate("6", Some(&above_only)), EvaluationStatus::Normal);
        assert_eq!(evaluate("4", Some(&above_only)), EvaluationStatus::Bajo);
    }

    #[test]
    fn placeholder_segment_is_normal_for_numbers() {
        let placeholder = ReferenceRangeSegment::placeholder(Sex::Ambos, 0.0, 120.0);
        assert_eq!(evaluate("85", Some(&placeholder)), EvaluationStatus::Normal);
        assert_eq!(
            evaluate("abc", Some(&placeholder)),
            EvaluationStatus::NoNumerico
        );
    }

    #[test]
    fn parses_decimals_and_whitespace() {
        assert_eq!(parse_result_value(" 4.25 "), Some(4.25));
        assert_eq!(parse_result_value("-0.5"), Some(-0.5));
        assert_eq!(parse_result_value("4,25"), None);
    }
}
