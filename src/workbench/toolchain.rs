//! Thin wrapper around the external `anchor` and `solana` binaries.
//!
//! The workbench never builds or sends transactions itself; everything
//! on-chain goes through these toolchain invocations. Instruction
//! invocation uses the `anchor run` script convention: a script named
//! `<program>.<instruction>` must exist in the workspace Anchor.toml.
use crate::config::Config;
use crate::logging;
use crate::{Result, WorkbenchError};
use std::process::Output;

pub struct Toolchain {
    anchor: String,
    solana: String,
}

impl Toolchain {
    pub fn from_config(config: &Config) -> Self {
        Toolchain {
            anchor: config.anchor_bin().to_string(),
            solana: config.solana_bin().to_string(),
        }
    }

    /// Log the versions of both toolchain binaries. Missing binaries are
    /// reported but not fatal here; the actual invocation will fail with
    /// a proper error.
    pub fn log_versions(&self) {
        for bin in [&self.anchor, &self.solana] {
            match std::process::Command::new(bin).arg("--version").output() {
                Ok(output) if output.status.success() => {
                    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
                    tracing::info!(binary = bin.as_str(), version = version.as_str(), "Toolchain binary");
                }
                _ => {
                    tracing::warn!(binary = bin.as_str(), "Toolchain binary not available");
                }
            }
        }
    }

    /// Run `anchor build`, streaming toolchain output to the operator.
    /// `program` limits the build to a single program.
    pub fn build(&self, program: Option<&str>) -> Result<()> {
        let mut command = std::process::Command::new(&self.anchor);
        command.arg("build");
        if let Some(name) = program {
            command.args(["--program-name", name]);
        }

        let status = command.status().map_err(|e| {
            WorkbenchError::ToolchainError(format!("Failed to spawn `{} build`: {}", self.anchor, e))
        })?;

        if !status.success() {
            return Err(WorkbenchError::ToolchainError(format!(
                "`{} build` exited with {}",
                self.anchor, status
            ))
            .into());
        }

        Ok(())
    }

    /// Run `anchor deploy`, streaming toolchain output to the operator.
    pub fn deploy(&self, program: Option<&str>) -> Result<()> {
        let mut command = std::process::Command::new(&self.anchor);
        command.arg("deploy");
        if let Some(name) = program {
            command.args(["--program-name", name]);
            logging::log_deploy_start(name);
        }

        let status = command.status().map_err(|e| {
            WorkbenchError::ToolchainError(format!(
                "Failed to spawn `{} deploy`: {}",
                self.anchor, e
            ))
        })?;

        if !status.success() {
            return Err(WorkbenchError::ToolchainError(format!(
                "`{} deploy` exited with {}",
                self.anchor, status
            ))
            .into());
        }

        Ok(())
    }

    /// Invoke one instruction through its `anchor run` script, blocking.
    /// Returns the script's stdout.
    pub fn invoke_instruction(&self, program: &str, instruction: &str, args: &str) -> Result<String> {
        logging::log_instruction_invoked(program, instruction);

        let output = std::process::Command::new(&self.anchor)
            .args(Self::script_args(program, instruction, args))
            .output()
            .map_err(|e| {
                WorkbenchError::ToolchainError(format!(
                    "Failed to spawn `{} run`: {}",
                    self.anchor, e
                ))
            })?;

        self.check_output(program, instruction, output)
    }

    /// Invoke one instruction through its `anchor run` script without
    /// blocking the runtime. Returns the script's stdout.
    pub async fn invoke_instruction_async(
        &self,
        program: &str,
        instruction: &str,
        args: &str,
    ) -> Result<String> {
        logging::log_instruction_invoked(program, instruction);

        let output = tokio::process::Command::new(&self.anchor)
            .args(Self::script_args(program, instruction, args))
            .output()
            .await
            .map_err(|e| {
                WorkbenchError::ToolchainError(format!(
                    "Failed to spawn `{} run`: {}",
                    self.anchor, e
                ))
            })?;

        self.check_output(program, instruction, output)
    }

    fn script_args(program: &str, instruction: &str, args: &str) -> Vec<String> {
        vec![
            "run".to_string(),
            format!("{}.{}", program, instruction),
            "--".to_string(),
            args.to_string(),
        ]
    }

    fn check_output(&self, program: &str, instruction: &str, output: Output) -> Result<String> {
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(WorkbenchError::ToolchainError(format!(
            "`{} run {}.{}` exited with {}: {}",
            self.anchor,
            program,
            instruction,
            output.status,
            stderr.trim()
        ))
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_args_convention() {
        let args = Toolchain::script_args("lottery", "join", r#"["alice", 100]"#);
        assert_eq!(args, vec!["run", "lottery.join", "--", r#"["alice", 100]"#]);
    }
}
