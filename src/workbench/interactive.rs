//! Interactive single-program execution.
//!
//! The operator picks a compiled program, one of its IDL instructions,
//! and supplies a value for every declared argument. The assembled call
//! goes through the toolchain's `anchor run` script convention.
use crate::config::Config;
use crate::ui::formatter::Formatter;
use crate::ui::prompt::Prompter;
use crate::workbench::idl::{load_idl_dir, IdlInstruction, ProgramIdl};
use crate::workbench::toolchain::Toolchain;
use crate::workbench::InteractiveRunner;
use crate::{Result, WorkbenchError};
use std::path::PathBuf;
use std::sync::Arc;

/// Assemble raw operator inputs into a JSON array argument string.
/// Each value that parses as JSON is kept as-is (numbers, booleans,
/// nested arrays); anything else becomes a JSON string.
pub fn assemble_args(raw: &[String]) -> String {
    let values: Vec<serde_json::Value> = raw
        .iter()
        .map(|input| {
            serde_json::from_str(input)
                .unwrap_or_else(|_| serde_json::Value::String(input.clone()))
        })
        .collect();
    serde_json::Value::Array(values).to_string()
}

/// Interactive data-insertion collaborator.
pub struct InteractiveSession {
    toolchain: Arc<Toolchain>,
    idl_dir: PathBuf,
    prompter: Prompter,
}

impl InteractiveSession {
    pub fn new(toolchain: Arc<Toolchain>, config: &Config) -> Result<Self> {
        Ok(InteractiveSession {
            toolchain,
            idl_dir: config.artifacts_dir().join("idl"),
            prompter: Prompter::new()?,
        })
    }

    /// Pick and run one program. `preselected` skips the program menu
    /// when it names a compiled program.
    pub fn run_program(&mut self, preselected: Option<&str>) -> Result<()> {
        let idls = load_idl_dir(&self.idl_dir)?;
        if idls.is_empty() {
            println!(
                "{}",
                Formatter::warning(format!(
                    "No IDL files found under {:?}. Compile the programs first.",
                    self.idl_dir
                ))
            );
            return Ok(());
        }

        let idl = match preselected {
            Some(name) => idls
                .iter()
                .find(|idl| idl.program_name() == name)
                .ok_or_else(|| {
                    WorkbenchError::IdlError(format!("No IDL found for program '{}'", name))
                })?,
            None => {
                let labels: Vec<String> =
                    idls.iter().map(|idl| idl.program_name().to_string()).collect();
                let Some(i) = self.prompter.pick("Which program?", &labels)? else {
                    return Ok(());
                };
                &idls[i]
            }
        };

        let Some(instruction) = self.pick_instruction(idl)? else {
            return Ok(());
        };

        let Some(args) = self.collect_args(&instruction)? else {
            return Ok(());
        };

        println!(
            "{}",
            Formatter::info(format!(
                "Running {}",
                Formatter::format_instruction_call(
                    idl.program_name(),
                    &instruction.name,
                    Some(args.as_str())
                )
            ))
        );

        let output = self
            .toolchain
            .invoke_instruction(idl.program_name(), &instruction.name, &args)?;

        if output.is_empty() {
            println!("{}", Formatter::success("Instruction completed"));
        } else {
            println!("{}", output);
            println!("{}", Formatter::success("Instruction completed"));
        }

        Ok(())
    }

    fn pick_instruction(&mut self, idl: &ProgramIdl) -> Result<Option<IdlInstruction>> {
        if idl.instructions.is_empty() {
            println!(
                "{}",
                Formatter::warning(format!(
                    "Program '{}' declares no instructions.",
                    idl.program_name()
                ))
            );
            return Ok(None);
        }

        let labels: Vec<String> = idl
            .instructions
            .iter()
            .map(|instruction| {
                let args: Vec<String> = instruction
                    .args
                    .iter()
                    .map(|arg| format!("{}: {}", arg.name, arg.type_display()))
                    .collect();
                format!("{}({})", instruction.name, args.join(", "))
            })
            .collect();

        let Some(i) = self.prompter.pick("Which instruction?", &labels)? else {
            return Ok(None);
        };
        Ok(Some(idl.instructions[i].clone()))
    }

    /// Prompt for one value per declared argument. `None` means the
    /// operator cancelled with Ctrl+D.
    fn collect_args(&mut self, instruction: &IdlInstruction) -> Result<Option<String>> {
        let mut values = Vec::with_capacity(instruction.args.len());
        for arg in &instruction.args {
            let prompt = format!("{} ({}): ", arg.name, arg.type_display());
            let Some(value) = self.prompter.read_line(&prompt)? else {
                return Ok(None);
            };
            values.push(value);
        }
        Ok(Some(assemble_args(&values)))
    }
}

impl InteractiveRunner for InteractiveSession {
    fn choose_program_to_run(&mut self) -> Result<()> {
        self.run_program(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_args_mixes_json_and_strings() {
        let raw = vec![
            "42".to_string(),
            "true".to_string(),
            "alice".to_string(),
            "[1, 2]".to_string(),
        ];
        assert_eq!(assemble_args(&raw), r#"[42,true,"alice",[1,2]]"#);
    }

    #[test]
    fn test_assemble_args_empty() {
        assert_eq!(assemble_args(&[]), "[]");
    }

    #[test]
    fn test_assemble_args_keeps_quoted_strings() {
        let raw = vec![r#""123""#.to_string()];
        assert_eq!(assemble_args(&raw), r#"["123"]"#);
    }
}
