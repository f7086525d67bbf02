//! CLI library components for the reference-range engine.

pub mod logging;
