//! Project metadata collection.
//!
//! The collector walks the six operator-facing fields in a fixed order, asking a
//! [`Prompter`] for each one. Later defaults are derived from earlier answers:
//! the package name from the repository URL, the title from the package name.

use std::fmt;

use serde::Serialize;

use crate::config::ProjectDefaults;
use crate::error::Result;

/// Personalization values for one configurator run. Read-only once collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectMetadata {
    pub author_name: String,
    pub author_email: String,
    pub repo_url: String,
    /// Last path segment of `repo_url` without `.git`.
    pub repo_name: String,
    pub package_name: String,
    pub project_title: String,
    pub project_description: String,
}

impl ProjectMetadata {
    /// Build metadata from the primary inputs, deriving the repository name.
    pub fn new(
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        repo_url: impl Into<String>,
        package_name: impl Into<String>,
        project_title: impl Into<String>,
        project_description: impl Into<String>,
    ) -> Self {
        let repo_url = repo_url.into();
        Self {
            author_name: author_name.into(),
            author_email: author_email.into(),
            repo_name: repo_name_from_url(&repo_url),
            repo_url,
            package_name: package_name.into(),
            project_title: project_title.into(),
            project_description: project_description.into(),
        }
    }

    /// Whether the package name is a plain identifier (letters, digits, underscores,
    /// not starting with a digit). Non-identifiers are accepted but worth a warning.
    pub fn package_name_is_identifier(&self) -> bool {
        is_identifier(&self.package_name)
    }
}

/// A field the operator is asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AuthorName,
    AuthorEmail,
    RepoUrl,
    PackageName,
    ProjectTitle,
    ProjectDescription,
}

impl Field {
    /// Label shown to the operator.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AuthorName => "Author Name",
            Self::AuthorEmail => "Author Email",
            Self::RepoUrl => "Repository URL",
            Self::PackageName => "Package Name",
            Self::ProjectTitle => "Project Title",
            Self::ProjectDescription => "Project Description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source of answers for the metadata prompts.
///
/// Implementations return the raw response; the collector trims it and falls back
/// to `default` when the response is empty.
pub trait Prompter {
    fn prompt(&mut self, field: Field, default: &str) -> Result<String>;
}

/// A prompter that accepts every default without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn prompt(&mut self, _field: Field, default: &str) -> Result<String> {
        Ok(default.to_string())
    }
}

/// Ask for every field in order and assemble the metadata.
pub fn collect(prompter: &mut dyn Prompter, defaults: &ProjectDefaults) -> Result<ProjectMetadata> {
    let author_name = ask(prompter, Field::AuthorName, &defaults.author_name)?;
    let author_email = ask(prompter, Field::AuthorEmail, &defaults.author_email)?;
    let repo_url = ask(prompter, Field::RepoUrl, &defaults.repo_url)?;

    let package_default = package_name_from_repo(&repo_name_from_url(&repo_url));
    let package_name = ask(prompter, Field::PackageName, &package_default)?;

    let title_default = title_from_package(&package_name);
    let project_title = ask(prompter, Field::ProjectTitle, &title_default)?;
    let project_description = ask(prompter, Field::ProjectDescription, &defaults.description)?;

    Ok(ProjectMetadata::new(
        author_name,
        author_email,
        repo_url,
        package_name,
        project_title,
        project_description,
    ))
}

fn ask(prompter: &mut dyn Prompter, field: Field, default: &str) -> Result<String> {
    let response = prompter.prompt(field, default)?;
    let response = response.trim();
    if response.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(response.to_string())
    }
}

/// `git@github.com:user/my-package.git` -> `my-package`.
pub fn repo_name_from_url(repo_url: &str) -> String {
    let last = repo_url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or_default();
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

/// `my-package` -> `my_package`.
pub fn package_name_from_repo(repo_name: &str) -> String {
    repo_name.replace('-', "_")
}

/// `my_package` -> `My Package`.
pub fn title_from_package(package_name: &str) -> String {
    title_case(&package_name.replace('_', " "))
}

/// Upper-case the first letter of every alphabetic run and lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
