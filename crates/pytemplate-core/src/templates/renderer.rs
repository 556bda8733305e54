//! Handlebars-based renderer for rule patterns and replacement values.
//!
//! Strict mode is enabled: a `{{variable}}` missing from the data context is an
//! error rather than an empty string, so a typo in a rule file surfaces before
//! any file is touched. HTML escaping is disabled since output is plain text.

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{ConfigureError, Result};

/// Template renderer for rule patterns and values.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled and escaping disabled.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| ConfigureError::TemplateRender(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
