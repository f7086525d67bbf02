//! Field alias tables, one per canonical field.
//!
//! Order is priority order: the wire/catalog name first, then the
//! manual-entry form name, then loose generator aliases. First present
//! value wins; later entries are never consulted once one matches.

pub const SEX_ALIASES: &[&str] = &["sex", "sexo", "gender"];

pub const AGE_MIN_ALIASES: &[&str] = &["age_min", "edadMin"];

pub const AGE_MAX_ALIASES: &[&str] = &["age_max", "edadMax"];

pub const AGE_UNIT_ALIASES: &[&str] = &["age_min_unit", "unidadEdad", "age_unit"];

pub const LOWER_ALIASES: &[&str] = &["lower", "valorMin", "min"];

pub const UPPER_ALIASES: &[&str] = &["upper", "valorMax", "max"];

/// `textoLibre` (free text) outranks `textoPermitido` (allowed-values text);
/// both land in the single canonical `text_value` field.
pub const TEXT_ALIASES: &[&str] = &["text_value", "textoLibre", "textoPermitido"];

pub const NOTES_ALIASES: &[&str] = &["notes", "notas"];
