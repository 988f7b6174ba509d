//! Console adapter for the menu dispatcher.
//!
//! The dispatcher only ever writes lines and reads choice tokens; this
//! trait keeps it independent of the terminal so the menu contracts can
//! be exercised with a scripted console in tests.
use crate::ui::formatter::Formatter;
use crate::{Result, WorkbenchError};
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{DefaultEditor, Editor};
use std::path::PathBuf;

/// Operator-facing line console.
pub trait Console {
    /// Write one line to the operator display.
    fn show(&mut self, line: &str);

    /// Read one trimmed choice token. `None` means end of input, which
    /// terminates the active menu like the exit token.
    fn read_choice(&mut self) -> Result<Option<String>>;
}

/// Production console over a rustyline editor.
pub struct RustylineConsole {
    editor: Editor<(), FileHistory>,
    history_path: PathBuf,
}

impl RustylineConsole {
    pub fn new() -> Result<Self> {
        let history_path = dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(".anchor_workbench_history");

        let mut editor = DefaultEditor::new()
            .map_err(|e| miette::miette!("Failed to initialize console editor: {}", e))?;

        // Load history if it exists
        let _ = editor.load_history(&history_path);

        Ok(RustylineConsole {
            editor,
            history_path,
        })
    }
}

impl Console for RustylineConsole {
    fn show(&mut self, line: &str) {
        println!("{}", line);
    }

    fn read_choice(&mut self) -> Result<Option<String>> {
        loop {
            match self.editor.readline("> ") {
                Ok(line) => {
                    let token = line.trim().to_string();
                    if !token.is_empty() {
                        let _ = self.editor.add_history_entry(&line);
                    }
                    return Ok(Some(token));
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", Formatter::info("Use '0' or Ctrl+D to go back"));
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(WorkbenchError::ConsoleError(e.to_string()).into()),
            }
        }
    }
}

impl Drop for RustylineConsole {
    fn drop(&mut self) {
        let _ = self.editor.save_history(&self.history_path);
    }
}
