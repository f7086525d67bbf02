//! Evaluation-time half of the reference-range engine.
//!
//! At report time every (parameter, patient, raw value) triple goes through
//! the same three steps: pick the one segment applicable to the patient,
//! classify the measured value against it, and render the range for
//! display. Nothing here ever fails: missing or malformed data degrades to
//! the `no-evaluable`/`no-numerico` statuses so one dirty parameter can
//! never abort a whole report.

mod evaluator;
mod format;
mod resolver;

pub use evaluator::{evaluate, parse_result_value};
pub use format::{ReferenceText, format_numeric, format_reference_text};
pub use resolver::resolve;
