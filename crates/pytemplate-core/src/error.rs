//! Unified error types for the pytemplate configurator.

use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::Stage;

/// All errors that can occur while configuring a template.
#[derive(Error, Debug)]
pub enum ConfigureError {
    // --- Configuration ---

    /// A defaults or rules file was not found or could not be read.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A defaults or rules file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Discovery ---

    /// No non-hidden directory under the source root contains the entry marker.
    #[error("no valid package directory found under {src_dir}")]
    PackageNotFound { src_dir: PathBuf },

    // --- Rewrites ---

    /// A required rewrite rule did not match the target's content.
    #[error("failed to match '{rule}' in {path}")]
    PatternNotFound { path: PathBuf, rule: String },

    /// A rewrite rule's pattern is not a valid regular expression.
    #[error("invalid pattern for rule '{rule}'")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// A rule supplies a different number of values than its pattern has groups.
    #[error("rule '{rule}' has {groups} capture groups but {values} replacement values")]
    RuleArity {
        rule: String,
        groups: usize,
        values: usize,
    },

    /// Handlebars rendering of a replacement value failed.
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    // --- Filesystem ---

    /// A target file could not be read.
    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A target file could not be written.
    #[error("failed to write {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The new package name cannot be used as a directory name next to the old one.
    #[error("invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: &'static str },

    /// The package directory could not be renamed.
    #[error("failed to rename {from} to {to}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Pipeline ---

    /// A pipeline stage failed; later stages were not run.
    #[error("{stage} failed")]
    StageFailed {
        stage: Stage,
        #[source]
        source: Box<ConfigureError>,
    },

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConfigureError {
    /// Wrap this error as the failure of a pipeline stage.
    pub fn in_stage(self, stage: Stage) -> Self {
        Self::StageFailed {
            stage,
            source: Box::new(self),
        }
    }
}

/// Alias for `Result<T, ConfigureError>`.
pub type Result<T> = std::result::Result<T, ConfigureError>;
