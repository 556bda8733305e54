//! Compile-time embedded template data.
//!
//! Paths are relative to this source file
//! (`crates/pytemplate-core/src/templates/embedded.rs`). Do NOT move the files
//! under `templates/` without updating the `include_str!` path here.

/// Built-in README rewrite rules (JSON list of rule specs).
pub const README_RULES: &str = include_str!("../../../../templates/readme/rules.json");
