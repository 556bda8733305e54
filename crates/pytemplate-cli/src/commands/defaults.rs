use std::path::Path;

use anyhow::Result;

use pytemplate_core::config::ProjectDefaults;

use crate::output;

/// Write the built-in defaults to `path` as a starting point for `--defaults`.
pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    ProjectDefaults::default().save(path)?;
    output::print_success(&format!("Wrote defaults to {}", path.display()));
    output::print_key_value(
        "Use with",
        &format!("pytemplate configure --defaults {}", path.display()),
    );
    Ok(())
}
