//! Human-readable output tables for the subcommands.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use labref_model::ReferenceRangeSegment;

use crate::commands::{ConsolidationResult, EvaluationResult};

pub fn print_consolidation(result: &ConsolidationResult) {
    if let Some(path) = &result.output_path {
        println!("Canonical segments: {path}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sexo"),
        header_cell("Edad"),
        header_cell("Rango"),
        header_cell("Notas"),
    ]);
    apply_table_style(&mut table);

    let mut placeholders = 0usize;
    for segment in &result.segments {
        if segment.is_placeholder() {
            placeholders += 1;
        }
        table.add_row(vec![
            Cell::new(segment.sex.as_str()),
            Cell::new(age_span(segment)),
            Cell::new(value_span(segment)).set_alignment(CellAlignment::Right),
            Cell::new(segment.notes.as_deref().unwrap_or("")),
        ]);
    }
    println!("{table}");
    println!(
        "{} candidates in, {} segments out ({} placeholders)",
        result.input_count,
        result.segments.len(),
        placeholders
    );
}

pub fn print_evaluation(result: &EvaluationResult) {
    println!("Estado: {}", result.status);
    println!("Referencia: {}", result.reference.value_text);
    if !result.reference.demographics.is_empty() {
        println!("Demografía: {}", result.reference.demographics);
    }
}

fn age_span(segment: &ReferenceRangeSegment) -> String {
    match (segment.age_min, segment.age_max) {
        (None, None) => "todas".to_string(),
        (Some(min), Some(max)) => format!("{} - {} {}", min, max, segment.age_min_unit),
        (None, Some(max)) => format!("≤ {} {}", max, segment.age_min_unit),
        (Some(min), None) => format!("≥ {} {}", min, segment.age_min_unit),
    }
}

fn value_span(segment: &ReferenceRangeSegment) -> String {
    if let Some(text) = &segment.text_value {
        return text.clone();
    }
    match (segment.lower, segment.upper) {
        (Some(lower), Some(upper)) => format!("{lower} - {upper}"),
        (None, Some(upper)) => format!("≤ {upper}"),
        (Some(lower), None) => format!("≥ {lower}"),
        (None, None) => "-".to_string(),
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
