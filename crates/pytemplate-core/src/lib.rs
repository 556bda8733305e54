//! Core library for pytemplate, the Python template configurator.
//!
//! Personalizes a freshly cloned Python package scaffold in one pass: collects
//! [`metadata::ProjectMetadata`] through a [`metadata::Prompter`], then runs the
//! [`pipeline::Configurator`] which renames the package directory and rewrites
//! import references, `pyproject.toml` and `README.md`.
//!
//! Every file rewrite goes through [`rules::RewriteTarget`]: a list of regex
//! rules that must all match before the file is written.

pub mod config;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod pipeline;
pub mod readme;
pub mod rename;
pub mod resolver;
pub mod rules;
pub mod sources;
pub mod templates;
