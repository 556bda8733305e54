//! Terminal prompter for the metadata collector.

use std::collections::HashMap;
use std::io::{BufRead, IsTerminal, Write};

use dialoguer::Input;

use pytemplate_core::error::{ConfigureError, Result};
use pytemplate_core::metadata::{Field, Prompter};

/// Answers from command-line flags first, then from the terminal.
///
/// Prompts read `<Field> (Default: "<default>"): `; an empty answer keeps the
/// default. When `interactive` is false, fields without a flag take their default
/// without asking. When stdin is not a terminal, answers are read one per line
/// and end of input keeps the remaining defaults.
pub struct TerminalPrompter {
    presets: HashMap<Field, String>,
    interactive: bool,
    piped: Option<Box<dyn BufRead>>,
}

impl TerminalPrompter {
    pub fn new(interactive: bool) -> Self {
        let stdin = std::io::stdin();
        let piped: Option<Box<dyn BufRead>> = if stdin.is_terminal() {
            None
        } else {
            Some(Box::new(std::io::BufReader::new(stdin)))
        };
        Self {
            presets: HashMap::new(),
            interactive,
            piped,
        }
    }

    /// Read answers from `reader` instead of the terminal.
    pub fn with_reader(mut self, reader: impl BufRead + 'static) -> Self {
        self.piped = Some(Box::new(reader));
        self
    }

    /// Answer `field` with `value` instead of prompting, if a value was given.
    pub fn preset(mut self, field: Field, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.presets.insert(field, value);
        }
        self
    }
}

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, field: Field, default: &str) -> Result<String> {
        if let Some(value) = self.presets.get(&field) {
            tracing::debug!(%field, "using value from command line");
            return Ok(value.clone());
        }
        if !self.interactive {
            return Ok(default.to_string());
        }

        let prompt = format!("{field} (Default: \"{default}\")");
        if let Some(reader) = self.piped.as_mut() {
            return read_line(reader.as_mut(), &prompt);
        }

        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ConfigureError::Other(e.into()))
    }
}

fn read_line(reader: &mut dyn BufRead, prompt: &str) -> Result<String> {
    eprint!("{prompt}: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    reader.read_line(&mut line)?;
    eprintln!();
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_wins() {
        let mut prompter =
            TerminalPrompter::new(false).preset(Field::PackageName, Some("engine_notes".into()));
        assert_eq!(
            prompter.prompt(Field::PackageName, "my_package").unwrap(),
            "engine_notes"
        );
    }

    #[test]
    fn test_piped_answers_read_per_line() {
        let mut prompter = TerminalPrompter::new(true)
            .with_reader(std::io::Cursor::new("Grace Hopper\n\n"));
        assert_eq!(
            prompter.prompt(Field::AuthorName, "Your Name").unwrap(),
            "Grace Hopper"
        );
        assert_eq!(prompter.prompt(Field::AuthorEmail, "a@b.c").unwrap(), "");
        // end of input yields an empty answer, which the collector turns into the default
        assert_eq!(prompter.prompt(Field::RepoUrl, "git@x:y/z.git").unwrap(), "");
    }

    #[test]
    fn test_piped_answers_feed_collector() {
        use pytemplate_core::config::ProjectDefaults;
        use pytemplate_core::metadata;

        let mut prompter = TerminalPrompter::new(true).with_reader(std::io::Cursor::new(
            "Ada\r\n\nhttps://github.com/ada/engine-notes.git\n",
        ));
        let meta = metadata::collect(&mut prompter, &ProjectDefaults::default()).unwrap();
        assert_eq!(meta.author_name, "Ada");
        assert_eq!(meta.author_email, "your.email@example.com");
        assert_eq!(meta.package_name, "engine_notes");
        assert_eq!(meta.project_title, "Engine Notes");
    }

    #[test]
    fn test_non_interactive_uses_default() {
        let mut prompter = TerminalPrompter::new(false).preset(Field::AuthorName, None);
        assert_eq!(
            prompter.prompt(Field::AuthorName, "Your Name").unwrap(),
            "Your Name"
        );
    }
}
