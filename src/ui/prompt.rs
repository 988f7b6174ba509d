//! Operator prompting for the interactive collaborators.
//!
//! Wraps a `rustyline` editor so program selection, argument entry and
//! seed entry share line editing and history with the rest of the tool.
use crate::menu::state::INVALID_CHOICE_DIAGNOSTIC;
use crate::ui::formatter::Formatter;
use crate::Result;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{DefaultEditor, Editor};

/// Outcome of parsing a numbered selection token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// "0", cancel the selection
    Back,
    /// A valid 1-based pick, converted to a 0-based index
    Index(usize),
    /// Anything else
    Invalid,
}

/// Parse a selection token against a list of `len` options numbered 1..=len,
/// with "0" reserved for going back.
pub fn parse_selection(token: &str, len: usize) -> Selection {
    let trimmed = token.trim();
    if trimmed == "0" {
        return Selection::Back;
    }
    match trimmed.parse::<usize>() {
        Ok(n) if n >= 1 && n <= len => Selection::Index(n - 1),
        _ => Selection::Invalid,
    }
}

/// Line-oriented prompter for collaborator flows.
pub struct Prompter {
    editor: Editor<(), FileHistory>,
}

impl Prompter {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| miette::miette!("Failed to initialize prompt editor: {}", e))?;
        Ok(Prompter { editor })
    }

    /// Read one trimmed line. Returns `None` when the operator cancels with
    /// Ctrl+D. Ctrl+C re-prompts.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.clone());
                    return Ok(Some(line.trim().to_string()));
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", Formatter::info("Use Ctrl+D to cancel"));
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => {
                    return Err(crate::WorkbenchError::ConsoleError(e.to_string()).into());
                }
            }
        }
    }

    /// Show a numbered list and read a pick. Returns the 0-based index of the
    /// chosen item, or `None` when the operator backs out ("0" or Ctrl+D).
    /// Invalid tokens re-prompt with the shared diagnostic.
    pub fn pick(&mut self, header: &str, labels: &[String]) -> Result<Option<usize>> {
        loop {
            println!("{}", header);
            for (i, label) in labels.iter().enumerate() {
                println!("{}", Formatter::format_option(&(i + 1).to_string(), label));
            }
            println!("{}", Formatter::format_option("0", "Back"));

            let Some(token) = self.read_line("> ")? else {
                return Ok(None);
            };

            match parse_selection(&token, labels.len()) {
                Selection::Back => return Ok(None),
                Selection::Index(i) => return Ok(Some(i)),
                Selection::Invalid => {
                    println!("{}", Formatter::warning(INVALID_CHOICE_DIAGNOSTIC));
                }
            }
        }
    }

    /// Ask a yes/no question. Empty input and Ctrl+D count as "no".
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let Some(answer) = self.read_line(&format!("{} [y/N] ", question))? else {
            return Ok(false);
        };
        Ok(matches!(answer.as_str(), "y" | "Y" | "yes"))
    }
}
