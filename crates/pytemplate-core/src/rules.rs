//! Regex rewrite rules and the files they apply to.
//!
//! A [`RewriteRule`] pairs a pattern with one replacement value per capture group:
//! only the captured spans are replaced, so surrounding text (quotes, keys,
//! backticks) stays untouched. A [`RewriteTarget`] applies its rules in order to
//! the evolving content of one file and writes the result only when every
//! required rule matched.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigureError, Result};

/// How many matches of a rule's pattern are replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceMode {
    /// Only the first match.
    #[default]
    First,
    /// Every non-overlapping match.
    All,
}

/// A labelled (pattern, replacement) pair.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub label: String,
    pattern: Regex,
    values: Vec<String>,
    pub required: bool,
    pub mode: ReplaceMode,
}

impl RewriteRule {
    /// Create a required, first-match rule.
    ///
    /// `values[i]` replaces capture group `i + 1`. The number of values must equal
    /// the number of capture groups in `pattern`.
    pub fn new(label: impl Into<String>, pattern: &str, values: Vec<String>) -> Result<Self> {
        let label = label.into();
        let pattern = Regex::new(pattern).map_err(|e| ConfigureError::InvalidPattern {
            rule: label.clone(),
            source: e,
        })?;
        let groups = pattern.captures_len() - 1;
        if groups != values.len() || groups == 0 {
            return Err(ConfigureError::RuleArity {
                rule: label,
                groups,
                values: values.len(),
            });
        }
        Ok(Self {
            label,
            pattern,
            values,
            required: true,
            mode: ReplaceMode::First,
        })
    }

    /// Shorthand for a rule with a single capture group.
    pub fn single(label: impl Into<String>, pattern: &str, value: impl Into<String>) -> Result<Self> {
        Self::new(label, pattern, vec![value.into()])
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn mode(mut self, mode: ReplaceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Apply the rule to `content`. Returns `None` when the pattern does not match.
    pub fn apply(&self, content: &str) -> Option<(String, usize)> {
        let mut spans: Vec<(usize, usize, &str)> = Vec::new();
        let mut matches = 0;

        for caps in self.pattern.captures_iter(content) {
            matches += 1;
            for (i, value) in self.values.iter().enumerate() {
                if let Some(group) = caps.get(i + 1) {
                    spans.push((group.start(), group.end(), value.as_str()));
                }
            }
            if self.mode == ReplaceMode::First {
                break;
            }
        }

        if matches == 0 {
            return None;
        }

        spans.sort_by_key(|&(start, _, _)| start);
        let mut out = String::with_capacity(content.len());
        let mut cursor = 0;
        for (start, end, value) in spans {
            if start < cursor {
                // nested groups: the outer replacement already covers this span
                continue;
            }
            out.push_str(&content[cursor..start]);
            out.push_str(value);
            cursor = end;
        }
        out.push_str(&content[cursor..]);
        Some((out, matches))
    }
}

/// Outcome of applying a target's rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub path: PathBuf,
    /// Labels of rules that matched, with their match counts.
    pub applied: Vec<(String, usize)>,
    /// Labels of optional rules that did not match.
    pub skipped: Vec<String>,
    /// Whether the file content changed.
    pub changed: bool,
}

/// One file and the ordered rules to apply to it.
#[derive(Debug, Clone)]
pub struct RewriteTarget {
    pub path: PathBuf,
    pub rules: Vec<RewriteRule>,
}

impl RewriteTarget {
    pub fn new(path: impl Into<PathBuf>, rules: Vec<RewriteRule>) -> Self {
        Self {
            path: path.into(),
            rules,
        }
    }

    /// Apply every rule to `content` in memory.
    ///
    /// Fails on the first required rule that does not match, naming it.
    pub fn rewrite(&self, content: &str) -> Result<(String, RewriteReport)> {
        let mut report = RewriteReport {
            path: self.path.clone(),
            ..RewriteReport::default()
        };
        let mut current = content.to_string();

        for rule in &self.rules {
            match rule.apply(&current) {
                Some((next, count)) => {
                    tracing::debug!(rule = %rule.label, count, path = %self.path.display(), "rule matched");
                    report.applied.push((rule.label.clone(), count));
                    current = next;
                }
                None if rule.required => {
                    return Err(ConfigureError::PatternNotFound {
                        path: self.path.clone(),
                        rule: rule.label.clone(),
                    });
                }
                None => {
                    tracing::debug!(rule = %rule.label, path = %self.path.display(), "optional rule skipped");
                    report.skipped.push(rule.label.clone());
                }
            }
        }

        report.changed = current != content;
        Ok((current, report))
    }

    /// Read the file, apply every rule, and write it back if anything changed.
    ///
    /// Nothing is written unless all required rules matched.
    pub fn apply(&self) -> Result<RewriteReport> {
        let content = read_file(&self.path)?;
        let (updated, report) = self.rewrite(&content)?;
        if report.changed {
            write_file(&self.path, &updated)?;
        }
        Ok(report)
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ConfigureError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| ConfigureError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
