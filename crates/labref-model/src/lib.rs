pub mod age;
pub mod enums;
pub mod error;
pub mod parameter;
pub mod segment;

pub use age::{PatientAgeData, calculate_age_in_units};
pub use enums::{AgeUnit, EvaluationStatus, Sex};
pub use error::{RangeError, RangeErrorKind, Result};
pub use parameter::Parameter;
pub use segment::ReferenceRangeSegment;
