//! README rewriting driven by rule data.
//!
//! Each rule is a [`RuleSpec`]: a pattern with one capture group and a replacement
//! value, both written as Handlebars templates over the project metadata. The
//! built-in set covers the heading, the first paragraph, the clone and cd
//! commands, `python -m` invocations and the `--author` example flag. More rules
//! can be appended from a JSON file without touching this module.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigureError, Result};
use crate::metadata::ProjectMetadata;
use crate::rules::{ReplaceMode, RewriteReport, RewriteRule, RewriteTarget};
use crate::templates::embedded;
use crate::templates::renderer::TemplateRenderer;

/// A README rewrite rule as stored in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub label: String,
    /// Regex with exactly one capture group; template variables are regex-escaped.
    pub pattern: String,
    /// Value for the captured span.
    pub replacement: String,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub mode: ReplaceMode,
}

fn default_required() -> bool {
    true
}

/// Parse a JSON list of rule specs.
pub fn parse_rules(json: &str, origin: &Path) -> Result<Vec<RuleSpec>> {
    serde_json::from_str(json).map_err(|e| ConfigureError::ConfigParse {
        path: origin.to_path_buf(),
        source: e,
    })
}

/// The rules embedded in the binary.
pub fn builtin_rules() -> Result<Vec<RuleSpec>> {
    parse_rules(embedded::README_RULES, Path::new("<builtin readme rules>"))
}

/// Load additional rules from a JSON file.
pub fn load_rules(path: &Path) -> Result<Vec<RuleSpec>> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigureError::ConfigNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_rules(&contents, path)
}

/// Renders [`RuleSpec`]s against metadata and applies them to a README.
pub struct ReadmeRewriter {
    specs: Vec<RuleSpec>,
    renderer: TemplateRenderer,
}

impl ReadmeRewriter {
    pub fn new(specs: Vec<RuleSpec>) -> Self {
        Self {
            specs,
            renderer: TemplateRenderer::new(),
        }
    }

    /// A rewriter with the built-in rule set.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(builtin_rules()?))
    }

    /// Append rules after the existing ones.
    pub fn extend(&mut self, specs: impl IntoIterator<Item = RuleSpec>) {
        self.specs.extend(specs);
    }

    /// Render every rule and build the rewrite target for `path`.
    pub fn target(
        &self,
        path: &Path,
        meta: &ProjectMetadata,
        old_package_name: &str,
    ) -> Result<RewriteTarget> {
        let values = template_context(meta, old_package_name)?;
        let patterns = regex_escaped(&values);

        let rules = self
            .specs
            .iter()
            .map(|spec| -> Result<RewriteRule> {
                let pattern = self.renderer.render(&spec.pattern, &patterns)?;
                let value = self.renderer.render(&spec.replacement, &values)?;
                Ok(RewriteRule::single(&spec.label, &pattern, value)?
                    .required(spec.required)
                    .mode(spec.mode))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RewriteTarget::new(path, rules))
    }

    /// Rewrite the README at `path`. Nothing is written if a required rule misses.
    pub fn rewrite(
        &self,
        path: &Path,
        meta: &ProjectMetadata,
        old_package_name: &str,
    ) -> Result<RewriteReport> {
        let report = self.target(path, meta, old_package_name)?.apply()?;
        tracing::info!(path = %path.display(), skipped = report.skipped.len(), "updated README");
        Ok(report)
    }
}

fn template_context(meta: &ProjectMetadata, old_package_name: &str) -> Result<Value> {
    let mut context = serde_json::to_value(meta).map_err(anyhow::Error::from)?;
    if let Value::Object(map) = &mut context {
        map.insert(
            "old_package_name".into(),
            Value::String(old_package_name.to_string()),
        );
    }
    Ok(context)
}

fn regex_escaped(values: &Value) -> Value {
    match values {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), regex_escaped(v)))
                .collect(),
        ),
        Value::String(s) => Value::String(regex::escape(s)),
        other => other.clone(),
    }
}
