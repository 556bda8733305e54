//! `pyproject.toml` rewriting.
//!
//! Four top-level fields are tracked, each matched at the start of a line:
//!
//! ```toml
//! name = "..."
//! version = "..."
//! description = "..."
//! authors = [{name = "...", email = "..."}]
//! ```
//!
//! All four must be present; if any is missing the file is left untouched.
//! Entry points such as `pt = "old_pkg.cli:main"` are also pointed at the new
//! package when present.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::metadata::ProjectMetadata;
use crate::rules::{self, ReplaceMode, RewriteReport, RewriteRule, RewriteTarget};

/// Version every configured project starts from.
pub const RESET_VERSION: &str = "0.0.0";

// Captures a basic-string body, escapes included.
const NAME_PATTERN: &str = r#"(?m)^name = "((?:[^"\\\n]|\\.)*)""#;
const DESCRIPTION_PATTERN: &str = r#"(?m)^description = "((?:[^"\\\n]|\\.)*)""#;
const AUTHORS_PATTERN: &str =
    r#"(?m)^authors = \[\{name = "((?:[^"\\\n]|\\.)*)", email = "((?:[^"\\\n]|\\.)*)"\}\]"#;
const VERSION_PATTERN: &str = r#"(?m)^version = "((?:[^"\\\n]|\\.)*)""#;

/// Current values of the tracked manifest fields. Missing fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestFields {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
}

/// Build the rewrite target for the manifest at `path`.
pub fn manifest_target(
    path: &Path,
    meta: &ProjectMetadata,
    old_package_name: &str,
) -> Result<RewriteTarget> {
    let entry_points = format!(
        r#"(?m)^[A-Za-z0-9_.-]+ = "({})[.:]"#,
        regex::escape(old_package_name)
    );
    let rules = vec![
        RewriteRule::single("name", NAME_PATTERN, toml_escape(&meta.package_name))?,
        RewriteRule::single(
            "description",
            DESCRIPTION_PATTERN,
            toml_escape(&meta.project_description),
        )?,
        RewriteRule::new(
            "authors",
            AUTHORS_PATTERN,
            vec![toml_escape(&meta.author_name), toml_escape(&meta.author_email)],
        )?,
        RewriteRule::single("version", VERSION_PATTERN, RESET_VERSION)?,
        RewriteRule::single("entry points", &entry_points, toml_escape(&meta.package_name))?
            .required(false)
            .mode(ReplaceMode::All),
    ];
    Ok(RewriteTarget::new(path, rules))
}

/// Rewrite the manifest at `path` with the new metadata, resetting the version.
pub fn rewrite_manifest(
    path: &Path,
    meta: &ProjectMetadata,
    old_package_name: &str,
) -> Result<RewriteReport> {
    let report = manifest_target(path, meta, old_package_name)?.apply()?;
    tracing::info!(path = %path.display(), "updated manifest");
    Ok(report)
}

/// Read the tracked fields without modifying the file.
pub fn read_fields(path: &Path) -> Result<ManifestFields> {
    let content = rules::read_file(path)?;
    Ok(parse_fields(&content))
}

fn parse_fields(content: &str) -> ManifestFields {
    let capture = |pattern: &str, group: usize| {
        regex::Regex::new(pattern)
            .ok()?
            .captures(content)?
            .get(group)
            .map(|m| m.as_str().to_string())
    };
    ManifestFields {
        name: capture(NAME_PATTERN, 1),
        version: capture(VERSION_PATTERN, 1),
        description: capture(DESCRIPTION_PATTERN, 1),
        author_name: capture(AUTHORS_PATTERN, 1),
        author_email: capture(AUTHORS_PATTERN, 2),
    }
}

/// Escape a value for a TOML basic string.
fn toml_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
