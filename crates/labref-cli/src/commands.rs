//! Subcommand implementations: thin adapters over the engine crates.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, info_span};

use labref_cli::logging::redact_value;
use labref_consolidate::consolidate;
use labref_model::{
    EvaluationStatus, ReferenceRangeSegment, Sex, calculate_age_in_units,
};
use labref_normalize::normalize_segments;
use labref_resolve::{ReferenceText, evaluate, format_reference_text, resolve};
use labref_validate::validate_segments;

use crate::cli::{ConsolidateArgs, EvaluateArgs};

/// Outcome of the `consolidate` subcommand.
pub struct ConsolidationResult {
    pub input_count: usize,
    pub segments: Vec<ReferenceRangeSegment>,
    /// Where the canonical JSON was written, when `--output` was given.
    pub output_path: Option<String>,
}

/// Outcome of the `evaluate` subcommand.
pub struct EvaluationResult {
    pub status: EvaluationStatus,
    pub reference: ReferenceText,
}

/// An `evaluate` request: candidate segments in any dialect plus the
/// patient context and the measured value.
#[derive(Deserialize)]
struct EvaluationRequest {
    segments: Vec<Value>,
    #[serde(default)]
    sex: Option<String>,
    birth_date: String,
    value: String,
    #[serde(default)]
    unit: Option<String>,
    /// Evaluation instant; defaults to the local wall clock. Mostly for
    /// reproducible runs and tests.
    #[serde(default)]
    now: Option<String>,
}

pub fn run_consolidate(args: &ConsolidateArgs) -> Result<ConsolidationResult> {
    let span = info_span!("consolidate", input = %args.input.display());
    let _guard = span.enter();

    let raws = read_raw_segments(&args.input)?;
    let normalized = normalize_segments(&raws);
    debug!(segments = normalized.len(), "normalized candidate batch");

    // Save gate: the first structural error aborts, nothing is written.
    let report = validate_segments(0, &normalized);
    if let Some(first) = report.issues.first() {
        bail!("{first}");
    }

    let segments = consolidate(&normalized);
    info!(
        input = normalized.len(),
        output = segments.len(),
        "consolidated reference ranges"
    );

    let payload =
        serde_json::to_string_pretty(&segments).context("serialize canonical segments")?;
    let output_path = match &args.output {
        Some(path) => {
            fs::write(path, payload)
                .with_context(|| format!("write canonical segments to {}", path.display()))?;
            Some(path.display().to_string())
        }
        None => {
            println!("{payload}");
            None
        }
    };

    Ok(ConsolidationResult {
        input_count: raws.len(),
        segments,
        output_path,
    })
}

pub fn run_evaluate(args: &EvaluateArgs) -> Result<EvaluationResult> {
    let span = info_span!("evaluate", input = %args.input.display());
    let _guard = span.enter();

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("read evaluation request {}", args.input.display()))?;
    let request: EvaluationRequest =
        serde_json::from_str(&content).context("parse evaluation request")?;

    let segments = normalize_segments(&request.segments);
    let patient_sex = request
        .sex
        .as_deref()
        .map_or(Sex::Ambos, Sex::normalize);

    let birth = parse_datetime(&request.birth_date)
        .with_context(|| format!("parse birth date {:?}", redact_value(&request.birth_date)))?;
    let now = match &request.now {
        Some(raw) => parse_datetime(raw).with_context(|| format!("parse timestamp {raw:?}"))?,
        None => Local::now().naive_local(),
    };
    let age = calculate_age_in_units(birth, now);
    debug!(
        patient_sex = %patient_sex,
        birth = redact_value(&request.birth_date),
        age_years = age.age_years,
        "resolving reference range"
    );

    let resolved = resolve(&segments, patient_sex, &age);
    let status = evaluate(&request.value, resolved);
    let reference = format_reference_text(resolved, request.unit.as_deref().unwrap_or(""));
    info!(status = %status, "evaluated result value");

    Ok(EvaluationResult { status, reference })
}

fn read_raw_segments(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read candidate segments {}", path.display()))?;
    let parsed: Value = serde_json::from_str(&content).context("parse candidate segments")?;
    match parsed {
        Value::Array(items) => Ok(items),
        _ => bail!("expected a JSON array of candidate segments"),
    }
}

/// Accept a date with or without a time component.
fn parse_datetime(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(datetime) = raw.parse::<NaiveDateTime>() {
        return Ok(datetime);
    }
    let date: NaiveDate = raw
        .parse()
        .with_context(|| format!("not an ISO date: {raw}"))?;
    date.and_hms_opt(0, 0, 0)
        .context("midnight out of range")
}
