//! Type-safe enumerations for reference-range concepts.
//!
//! The persisted catalog stores these as Spanish-language tokens
//! (`Ambos`, `años`, `bajo`, ...). The enums here parse and render those
//! tokens so the rest of the engine never handles raw strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient sex scope of a reference-range segment.
///
/// `Ambos` ("both") marks a segment applicable regardless of patient sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    Ambos,
    Masculino,
    Femenino,
}

impl Sex {
    /// Returns the canonical token as persisted in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Ambos => "Ambos",
            Sex::Masculino => "Masculino",
            Sex::Femenino => "Femenino",
        }
    }

    /// Normalize an arbitrary producer string into a canonical sex.
    ///
    /// Case-insensitive prefix match: anything starting with `m` is
    /// `Masculino`, `f` is `Femenino`, `a` is `Ambos`. Everything else,
    /// including the empty string, falls back to `Ambos`.
    pub fn normalize(raw: &str) -> Sex {
        match raw.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('m') => Sex::Masculino,
            Some('f') => Sex::Femenino,
            _ => Sex::Ambos,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Ambos" => Ok(Sex::Ambos),
            "Masculino" => Ok(Sex::Masculino),
            "Femenino" => Ok(Sex::Femenino),
            other => Err(format!("Unknown sex token: {}", other)),
        }
    }
}

impl Default for Sex {
    fn default() -> Self {
        Sex::Ambos
    }
}

/// Unit in which both age bounds of a segment are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeUnit {
    #[serde(rename = "años")]
    Years,
    #[serde(rename = "meses")]
    Months,
    #[serde(rename = "días")]
    Days,
}

impl AgeUnit {
    /// Returns the canonical token as persisted in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeUnit::Years => "años",
            AgeUnit::Months => "meses",
            AgeUnit::Days => "días",
        }
    }

    /// Map a producer synonym onto a canonical unit.
    ///
    /// Returns `None` for anything outside the synonym table so callers can
    /// pass unrecognized tokens through for the validator to reject.
    pub fn from_synonym(raw: &str) -> Option<AgeUnit> {
        match raw.trim().to_lowercase().as_str() {
            "year" | "years" | "ano" | "anos" | "año" | "años" => Some(AgeUnit::Years),
            "month" | "months" | "mes" | "meses" => Some(AgeUnit::Months),
            "day" | "days" | "dia" | "dias" | "día" | "días" => Some(AgeUnit::Days),
            _ => None,
        }
    }

    /// Conversion factor from years into this unit.
    ///
    /// Months use 12/year and days 365/year; this matches the linear
    /// sub-year arithmetic of [`crate::age::calculate_age_in_units`], which
    /// deliberately avoids calendar math below one year.
    pub fn per_year(&self) -> f64 {
        match self {
            AgeUnit::Years => 1.0,
            AgeUnit::Months => 12.0,
            AgeUnit::Days => 365.0,
        }
    }
}

impl fmt::Display for AgeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgeUnit {
    type Err = String;

    /// Parse a canonical unit token. Synonyms are intentionally rejected
    /// here; producers go through [`AgeUnit::from_synonym`] first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "años" => Ok(AgeUnit::Years),
            "meses" => Ok(AgeUnit::Months),
            "días" => Ok(AgeUnit::Days),
            other => Err(format!("Unknown age unit: {}", other)),
        }
    }
}

impl Default for AgeUnit {
    fn default() -> Self {
        AgeUnit::Years
    }
}

/// Outcome of classifying a measured value against a resolved segment.
///
/// Rendered on reports verbatim, so the tokens are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationStatus {
    /// No segment resolved for this patient; nothing to compare against.
    #[serde(rename = "no-evaluable")]
    NoEvaluable,
    /// Value inside the range (bounds inclusive), or a text-valued range.
    #[serde(rename = "normal")]
    Normal,
    /// The raw value could not be parsed as a number.
    #[serde(rename = "no-numerico")]
    NoNumerico,
    /// Below the lower bound.
    #[serde(rename = "bajo")]
    Bajo,
    /// Above the upper bound.
    #[serde(rename = "alto")]
    Alto,
}

impl EvaluationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationStatus::NoEvaluable => "no-evaluable",
            EvaluationStatus::Normal => "normal",
            EvaluationStatus::NoNumerico => "no-numerico",
            EvaluationStatus::Bajo => "bajo",
            EvaluationStatus::Alto => "alto",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
