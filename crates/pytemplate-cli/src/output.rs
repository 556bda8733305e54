//! Terminal output formatting for the pytemplate CLI.
//!
//! Provides consistent, colored output using the [`console`] crate.

use console::style;
use pytemplate_core::pipeline::{Reporter, Stage};

/// Print a bold cyan header with an underline separator.
pub fn print_header(text: &str) {
    println!("\n{}", style(text).bold().cyan());
    println!("{}", style("=".repeat(text.len())).dim());
}

/// Print a success message prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a warning message prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print an error message prefixed with red `[ERROR]`.
pub fn print_error(text: &str) {
    eprintln!("{} {}", style("[ERROR]").red().bold(), text);
}

/// Print a progress step indicator like `[2/5] package rename`.
pub fn print_step(step: u32, total: u32, text: &str) {
    println!("{} {}", style(format!("[{step}/{total}]")).dim(), text);
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Prints each pipeline stage as a numbered step.
pub struct StepReporter;

impl Reporter for StepReporter {
    fn stage_started(&mut self, stage: Stage) {
        print_step(stage.index(), Stage::total(), &stage.to_string());
    }

    fn stage_finished(&mut self, _stage: Stage, detail: &str) {
        print_key_value("done", detail);
    }
}
