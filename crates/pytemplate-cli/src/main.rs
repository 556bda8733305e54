//! pytemplate CLI: personalize a freshly cloned Python package template.
//!
//! Provides three commands:
//! `configure` (the default), `inspect`, and `defaults`.
//!
//! The rewrite logic lives in [`pytemplate_core`]; this crate handles
//! arguments, prompts, confirmation and terminal output.

mod commands;
mod output;
mod prompt;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pytemplate_core::config::TemplateLayout;

#[derive(Parser)]
#[command(
    name = "pytemplate",
    about = "Personalize a Python package template: package name, author, README, pyproject",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project root containing pyproject.toml, README.md and src/
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Manifest path relative to the root
    #[arg(long, global = true, default_value = "pyproject.toml")]
    manifest: PathBuf,

    /// README path relative to the root
    #[arg(long, global = true, default_value = "README.md")]
    readme: PathBuf,

    /// Source directory holding the package, relative to the root
    #[arg(long, global = true, default_value = "src")]
    src_dir: PathBuf,

    /// Test directory scanned for imports, relative to the root
    #[arg(long, global = true, default_value = "tests")]
    tests_dir: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

impl Cli {
    fn layout(&self) -> TemplateLayout {
        TemplateLayout {
            manifest: self.manifest.clone(),
            readme: self.readme.clone(),
            src_dir: self.src_dir.clone(),
            tests_dir: self.tests_dir.clone(),
            ..TemplateLayout::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for project metadata and rewrite the template (default)
    Configure(ConfigureArgs),

    /// Show the detected package and current manifest values without changing anything
    Inspect {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the built-in prompt defaults to a JSON file for editing
    Defaults {
        /// Output path
        #[arg(long, short, default_value = "pytemplate.defaults.json")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ConfigureArgs {
    /// JSON file with prompt defaults (see `pytemplate defaults`)
    #[arg(long, env = "PYTEMPLATE_DEFAULTS")]
    defaults: Option<PathBuf>,

    /// JSON file with extra README rewrite rules
    #[arg(long)]
    readme_rules: Option<PathBuf>,

    /// Accept defaults for every field not given on the command line and skip confirmations
    #[arg(long, short)]
    yes: bool,

    /// Author name
    #[arg(long)]
    author_name: Option<String>,

    /// Author email
    #[arg(long)]
    author_email: Option<String>,

    /// Repository URL
    #[arg(long)]
    repo_url: Option<String>,

    /// Package name
    #[arg(long)]
    package_name: Option<String>,

    /// Project title
    #[arg(long)]
    title: Option<String>,

    /// Project description
    #[arg(long)]
    description: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let layout = cli.layout();

    match cli.command {
        None => {
            let args = ConfigureArgs {
                defaults: std::env::var_os("PYTEMPLATE_DEFAULTS").map(PathBuf::from),
                ..ConfigureArgs::default()
            };
            commands::configure::run(&cli.root, layout, args)?
        }
        Some(Commands::Configure(args)) => commands::configure::run(&cli.root, layout, args)?,
        Some(Commands::Inspect { json }) => commands::inspect::run(&cli.root, &layout, json)?,
        Some(Commands::Defaults { output, force }) => commands::defaults::run(&output, force)?,
    }

    Ok(())
}
