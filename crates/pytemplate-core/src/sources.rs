//! Rewriting import references to the renamed package.
//!
//! Three forms are rewritten, each anchored on word boundaries so that longer
//! identifiers sharing the old name as a prefix are left alone:
//!
//! ```text
//! import old_pkg          -> import new_pkg
//! from old_pkg import x   -> from new_pkg import x
//! old_pkg.helper()        -> new_pkg.helper()
//! old_pkg_extra           (unchanged)
//! ```
//!
//! The batch is read-before-write: every file is read and rewritten in memory
//! first, so an unreadable file aborts the batch before anything is written.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ConfigureError, Result};
use crate::rules::{self, ReplaceMode, RewriteRule, RewriteTarget};

/// Result of a source rewrite batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRewriteReport {
    /// Number of source files inspected.
    pub files_scanned: usize,
    /// Files whose content was rewritten, in scan order.
    pub files_changed: Vec<PathBuf>,
}

/// The three reference rules for renaming `old` to `new`.
pub fn reference_rules(old: &str, new: &str) -> Result<Vec<RewriteRule>> {
    let old = regex::escape(old);
    let rule = |label: &str, pattern: String| {
        RewriteRule::single(label, &pattern, new)
            .map(|r| r.required(false).mode(ReplaceMode::All))
    };
    Ok(vec![
        rule("import", format!(r"\bimport\s+({old})\b"))?,
        rule("from-import", format!(r"\bfrom\s+({old})\b"))?,
        rule("attribute", format!(r"\b({old})\."))?,
    ])
}

/// Every file with extension `extension` under `dirs`, recursively, in name order.
///
/// Directories that do not exist are skipped.
pub fn collect_source_files(dirs: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dir in dirs {
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "scan directory missing, skipping");
            continue;
        }
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| ConfigureError::ReadFile {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone()),
                source: e.into(),
            })?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == extension)
            {
                files.push(path.to_path_buf());
            }
        }
    }
    Ok(files)
}

/// Rename references from `old` to `new` in every source file under `dirs`.
pub fn rewrite_references(
    dirs: &[PathBuf],
    extension: &str,
    old: &str,
    new: &str,
) -> Result<SourceRewriteReport> {
    if old == new {
        tracing::info!("package name unchanged, skipping source rewrite");
        return Ok(SourceRewriteReport::default());
    }

    let files = collect_source_files(dirs, extension)?;
    let rules = reference_rules(old, new)?;

    let mut pending = Vec::new();
    for path in &files {
        let content = rules::read_file(path)?;
        let target = RewriteTarget::new(path, rules.clone());
        let (updated, report) = target.rewrite(&content)?;
        if report.changed {
            pending.push((path, updated));
        }
    }

    let mut files_changed = Vec::with_capacity(pending.len());
    for (path, updated) in pending {
        rules::write_file(path, &updated)?;
        tracing::debug!(path = %path.display(), "rewrote package references");
        files_changed.push(path.clone());
    }

    Ok(SourceRewriteReport {
        files_scanned: files.len(),
        files_changed,
    })
}
