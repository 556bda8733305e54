//! Template data embedded into the configurator.
//!
//! The built-in README rule set lives in `templates/readme/rules.json` and is
//! embedded at compile-time via [`include_str!`] in the [`embedded`] module.
//! Rule replacement values and patterns are Handlebars templates rendered with
//! [`renderer::TemplateRenderer`].
//!
//! ## Template variables
//!
//! - `{{package_name}}`, `{{project_title}}`, `{{project_description}}`
//! - `{{author_name}}`, `{{author_email}}`
//! - `{{repo_url}}`, `{{repo_name}}`
//! - `{{old_package_name}}`: the package name before the rename
//!
//! In patterns every variable is regex-escaped before substitution.

pub mod embedded;
pub mod renderer;
