use std::io::IsTerminal;
use std::path::Path;

use anyhow::Result;
use dialoguer::Confirm;

use pytemplate_core::config::{ProjectDefaults, TemplateLayout};
use pytemplate_core::error::ConfigureError;
use pytemplate_core::metadata::{self, Field, ProjectMetadata};
use pytemplate_core::pipeline::Configurator;
use pytemplate_core::readme::{self, ReadmeRewriter};

use crate::output::{self, StepReporter};
use crate::prompt::TerminalPrompter;
use crate::ConfigureArgs;

/// Personalize the template at `root`.
///
/// Collects metadata (flags first, then prompts or piped stdin lines), resolves
/// the current package, confirms before deleting an existing destination
/// directory, then renames the package and rewrites sources, `pyproject.toml` and
/// `README.md`. Stops at the first failing stage without undoing earlier ones.
pub fn run(root: &Path, layout: TemplateLayout, args: ConfigureArgs) -> Result<()> {
    output::print_header("Project Configuration");

    let defaults = match &args.defaults {
        Some(path) => ProjectDefaults::load(path)?,
        None => ProjectDefaults::default(),
    };

    let meta = {
        let mut prompter = TerminalPrompter::new(!args.yes)
            .preset(Field::AuthorName, args.author_name)
            .preset(Field::AuthorEmail, args.author_email)
            .preset(Field::RepoUrl, args.repo_url)
            .preset(Field::PackageName, args.package_name)
            .preset(Field::ProjectTitle, args.title)
            .preset(Field::ProjectDescription, args.description);
        metadata::collect(&mut prompter, &defaults)?
    };
    print_metadata(&meta);

    if !meta.package_name_is_identifier() {
        output::print_warning(&format!(
            "'{}' is not a valid Python identifier; imports of it will not work",
            meta.package_name
        ));
    }

    let mut rewriter = ReadmeRewriter::builtin()?;
    if let Some(path) = &args.readme_rules {
        rewriter.extend(readme::load_rules(path)?);
    }
    let configurator = Configurator::new(root, layout, rewriter);
    let mut reporter = StepReporter;

    let plan = configurator
        .plan(&meta, &mut reporter)
        .map_err(report_failure)?;

    if plan.overwrites_existing {
        output::print_warning(&format!(
            "{} already exists and will be permanently deleted",
            plan.destination.display()
        ));
        if !args.yes && !std::io::stdin().is_terminal() {
            anyhow::bail!("refusing to delete without confirmation; pass --yes to replace it");
        }
        let proceed = args.yes
            || Confirm::new()
                .with_prompt("Delete it and continue?")
                .default(false)
                .interact()?;
        if !proceed {
            anyhow::bail!("configuration cancelled; nothing was changed");
        }
    }

    let report = configurator
        .execute(&plan, &meta, &mut reporter)
        .map_err(report_failure)?;

    output::print_success("Configuration Complete");
    output::print_key_value("Package", &report.rename.package_dir().display().to_string());
    if !report.readme.skipped.is_empty() {
        output::print_key_value("README rules not present", &report.readme.skipped.join(", "));
    }
    println!();

    Ok(())
}

fn print_metadata(meta: &ProjectMetadata) {
    println!();
    output::print_key_value("Author", &format!("{} <{}>", meta.author_name, meta.author_email));
    output::print_key_value("Repository", &meta.repo_url);
    output::print_key_value("Package", &meta.package_name);
    output::print_key_value("Title", &meta.project_title);
    output::print_key_value("Description", &meta.project_description);
    println!();
}

const STOPPED: &str = "configuration stopped; completed stages were not rolled back";

/// Print the failure with its causes, then return a summary for the exit status.
///
/// The summary carries no cause chain, so the failure is shown once.
fn report_failure(err: ConfigureError) -> anyhow::Error {
    output::print_error(&failure_detail(err));
    anyhow::anyhow!(STOPPED)
}

fn failure_detail(err: ConfigureError) -> String {
    format!("{:#}", anyhow::Error::from(err))
}
