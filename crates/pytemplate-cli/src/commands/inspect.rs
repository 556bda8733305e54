use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use pytemplate_core::config::TemplateLayout;
use pytemplate_core::manifest::{self, ManifestFields};
use pytemplate_core::resolver;

use crate::output;

#[derive(Serialize)]
struct Inspection {
    package_dir: String,
    package_name: String,
    manifest: ManifestFields,
}

/// Show the current package and the tracked manifest fields. Read-only.
pub fn run(root: &Path, layout: &TemplateLayout, json: bool) -> Result<()> {
    let package_dir = resolver::resolve_package_dir(&root.join(&layout.src_dir), &layout.entry_marker)?;
    let fields = manifest::read_fields(&root.join(&layout.manifest))?;

    let inspection = Inspection {
        package_name: resolver::package_name(&package_dir),
        package_dir: package_dir.display().to_string(),
        manifest: fields,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
        return Ok(());
    }

    output::print_header("pytemplate inspect");
    output::print_key_value("Package", &inspection.package_name);
    output::print_key_value("Directory", &inspection.package_dir);

    let missing = "(missing)";
    let m = &inspection.manifest;
    output::print_key_value("name", m.name.as_deref().unwrap_or(missing));
    output::print_key_value("version", m.version.as_deref().unwrap_or(missing));
    output::print_key_value("description", m.description.as_deref().unwrap_or(missing));
    output::print_key_value("author", m.author_name.as_deref().unwrap_or(missing));
    output::print_key_value("email", m.author_email.as_deref().unwrap_or(missing));

    if m.name.is_none()
        || m.version.is_none()
        || m.description.is_none()
        || m.author_name.is_none()
        || m.author_email.is_none()
    {
        output::print_warning("manifest is missing tracked fields; `configure` will fail on it");
    }

    Ok(())
}
