//! Operator defaults and scaffold layout.
//!
//! [`ProjectDefaults`] holds the values offered at each prompt when the operator
//! has nothing better to suggest. It is plain data passed into the collector and
//! can be saved to / loaded from a JSON file so teams can share their defaults.
//!
//! [`TemplateLayout`] names the files and directories the configurator touches,
//! relative to the project root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigureError, Result};

/// Default values offered at the metadata prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDefaults {
    pub author_name: String,
    pub author_email: String,
    pub repo_url: String,
    pub description: String,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            author_name: "Your Name".into(),
            author_email: "your.email@example.com".into(),
            repo_url: "git@github.com:username/my-package.git".into(),
            description: "An awesome Python project.".into(),
        }
    }
}

impl ProjectDefaults {
    /// Load defaults from a JSON file. Missing fields fall back to the built-in values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigureError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| ConfigureError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save defaults as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigureError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| ConfigureError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Locations of the scaffold's files, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLayout {
    /// Package manifest (`pyproject.toml`).
    pub manifest: PathBuf,
    /// Project README.
    pub readme: PathBuf,
    /// Directory holding the package directory (`src`).
    pub src_dir: PathBuf,
    /// Test directory scanned for import references.
    pub tests_dir: PathBuf,
    /// File whose presence marks the package directory.
    pub entry_marker: String,
    /// Extension of source files scanned for import references.
    pub source_extension: String,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("pyproject.toml"),
            readme: PathBuf::from("README.md"),
            src_dir: PathBuf::from("src"),
            tests_dir: PathBuf::from("tests"),
            entry_marker: "__main__.py".into(),
            source_extension: "py".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.json");
        let defaults = ProjectDefaults {
            author_name: "Ada Lovelace".into(),
            ..ProjectDefaults::default()
        };
        defaults.save(&path).unwrap();
        assert_eq!(ProjectDefaults::load(&path).unwrap(), defaults);
    }

    #[test]
    fn test_defaults_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.json");
        std::fs::write(&path, r#"{"author_email": "team@example.org"}"#).unwrap();

        let loaded = ProjectDefaults::load(&path).unwrap();
        assert_eq!(loaded.author_email, "team@example.org");
        assert_eq!(loaded.author_name, "Your Name");
    }

    #[test]
    fn test_defaults_load_missing() {
        let result = ProjectDefaults::load(Path::new("/tmp/nonexistent_pytemplate_defaults.json"));
        assert!(matches!(result, Err(ConfigureError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_defaults_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            ProjectDefaults::load(&path),
            Err(ConfigureError::ConfigParse { .. })
        ));
    }
}
