//! Automatic execution-trace replay.
//!
//! A trace file is a JSON array of instruction calls replayed strictly
//! in order, without per-step operator input. Each step records its
//! outcome and wall-clock duration; a failing step does not stop the
//! replay, it is reported in the final summary.
use crate::logging;
use crate::ui::formatter::Formatter;
use crate::workbench::toolchain::Toolchain;
use crate::workbench::TraceRunner;
use crate::{Result, WorkbenchError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// A single step of an execution trace
#[derive(Debug, Clone, Serialize)]
pub struct TraceStep {
    pub program: String,
    pub instruction: String,
    /// Arguments as JSON array string
    pub args: String,
    /// Optional label for this step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Optional expected output for assertion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct TraceStepInput {
    program: String,
    instruction: String,
    #[serde(default)]
    args: Option<Value>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    expected: Option<Value>,
}

impl From<TraceStepInput> for TraceStep {
    fn from(value: TraceStepInput) -> Self {
        TraceStep {
            program: value.program,
            instruction: value.instruction,
            args: value
                .args
                .map(json_value_to_text)
                .unwrap_or_else(|| "[]".to_string()),
            label: value.label,
            expected: value.expected.map(json_value_to_text),
        }
    }
}

fn json_value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// A full execution trace
#[derive(Debug, Clone)]
pub struct ExecutionTrace {
    pub steps: Vec<TraceStep>,
}

impl ExecutionTrace {
    /// Load a trace from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            WorkbenchError::TraceError(format!(
                "Failed to read trace file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let parsed: Vec<TraceStepInput> = serde_json::from_str(&content).map_err(|e| {
            WorkbenchError::TraceError(format!(
                "Failed to parse trace file as JSON array {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let steps = parsed.into_iter().map(TraceStep::from).collect::<Vec<_>>();
        logging::log_trace_loaded(&path.as_ref().to_string_lossy(), steps.len());

        Ok(ExecutionTrace { steps })
    }
}

/// Result of one replayed step
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub index: usize,
    pub label: Option<String>,
    pub call: String,
    pub output: String,
    pub success: bool,
    pub error: Option<String>,
    pub expected: Option<String>,
    pub passed: bool,
    pub duration_ms: u128,
}

/// Summary of a trace replay
#[derive(Debug, Serialize)]
pub struct TraceSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub total_duration_ms: u128,
}

/// Executes one instruction call on behalf of the replayer.
#[async_trait]
pub trait ProgramInvoker: Send + Sync {
    async fn invoke(&self, program: &str, instruction: &str, args: &str) -> Result<String>;
}

/// Production invoker going through the `anchor run` script convention.
pub struct ScriptInvoker {
    toolchain: Arc<Toolchain>,
}

impl ScriptInvoker {
    pub fn new(toolchain: Arc<Toolchain>) -> Self {
        ScriptInvoker { toolchain }
    }
}

#[async_trait]
impl ProgramInvoker for ScriptInvoker {
    async fn invoke(&self, program: &str, instruction: &str, args: &str) -> Result<String> {
        self.toolchain
            .invoke_instruction_async(program, instruction, args)
            .await
    }
}

/// Trace replayer collaborator
pub struct TraceReplayer {
    invoker: Box<dyn ProgramInvoker>,
    trace_path: PathBuf,
}

impl TraceReplayer {
    pub fn new(invoker: Box<dyn ProgramInvoker>, trace_path: PathBuf) -> Self {
        TraceReplayer { invoker, trace_path }
    }

    /// Replay every step in order, awaiting each before the next.
    pub async fn replay(&self, trace: &ExecutionTrace) -> Vec<StepResult> {
        let mut results = Vec::with_capacity(trace.steps.len());

        for (index, step) in trace.steps.iter().enumerate() {
            let start = Instant::now();
            let invoked = self
                .invoker
                .invoke(&step.program, &step.instruction, &step.args)
                .await;
            let duration_ms = start.elapsed().as_millis();

            let (output, success, error) = match invoked {
                Ok(output) => (output, true, None),
                Err(e) => (String::new(), false, Some(format!("{:#}", e))),
            };

            let passed = success
                && step
                    .expected
                    .as_deref()
                    .map(|expected| expected == output.trim())
                    .unwrap_or(true);

            logging::log_trace_step(index, &step.instruction);

            results.push(StepResult {
                index,
                label: step.label.clone(),
                call: Formatter::format_instruction_call(
                    &step.program,
                    &step.instruction,
                    Some(step.args.as_str()),
                ),
                output,
                success,
                error,
                expected: step.expected.clone(),
                passed,
                duration_ms,
            });
        }

        results
    }

    /// Compute the replay summary
    pub fn summarize(results: &[StepResult]) -> TraceSummary {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let errors = results.iter().filter(|r| !r.success).count();
        let failed = total - passed - errors;
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        TraceSummary {
            total,
            passed,
            failed,
            errors,
            total_duration_ms,
        }
    }

    /// Display results in a formatted way
    pub fn display_results(results: &[StepResult], summary: &TraceSummary) {
        logging::log_display("", logging::LogLevel::Info);
        logging::log_display("=".repeat(80), logging::LogLevel::Info);
        logging::log_display("  Execution Trace Results", logging::LogLevel::Info);
        logging::log_display("=".repeat(80), logging::LogLevel::Info);

        for result in results {
            let status = if result.passed {
                "PASS"
            } else if result.success {
                "FAIL"
            } else {
                "ERROR"
            };

            let default_label = format!("Step #{}", result.index);
            let label = result.label.as_deref().unwrap_or(&default_label);

            logging::log_display(format!("\n{} {}", status, label), logging::LogLevel::Info);
            logging::log_display(format!("  Call: {}", result.call), logging::LogLevel::Info);

            if result.success {
                if !result.output.is_empty() {
                    logging::log_display(
                        format!("  Output: {}", result.output),
                        logging::LogLevel::Info,
                    );
                }
                if let Some(expected) = &result.expected {
                    logging::log_display(
                        format!("  Expected: {}", expected),
                        logging::LogLevel::Info,
                    );
                    if !result.passed {
                        logging::log_display(
                            format!(
                                "  {}",
                                Formatter::warning("Output does not match expected value")
                            ),
                            logging::LogLevel::Warn,
                        );
                    }
                }
            } else if let Some(error) = &result.error {
                logging::log_display(
                    format!("  Error: {}", Formatter::error(error)),
                    logging::LogLevel::Error,
                );
            }

            logging::log_display(
                format!("  Duration: {}ms", result.duration_ms),
                logging::LogLevel::Info,
            );
        }

        logging::log_display("", logging::LogLevel::Info);
        logging::log_display("=".repeat(80), logging::LogLevel::Info);
        logging::log_display("  Summary", logging::LogLevel::Info);
        logging::log_display("=".repeat(80), logging::LogLevel::Info);
        logging::log_display(format!("  Total:    {}", summary.total), logging::LogLevel::Info);
        logging::log_display(
            format!(
                "  {}",
                Formatter::success(format!("Passed:   {}", summary.passed))
            ),
            logging::LogLevel::Info,
        );

        if summary.failed > 0 {
            logging::log_display(
                format!(
                    "  {}",
                    Formatter::warning(format!("Failed:   {}", summary.failed))
                ),
                logging::LogLevel::Warn,
            );
        }

        if summary.errors > 0 {
            logging::log_display(
                format!(
                    "  {}",
                    Formatter::error(format!("Errors:   {}", summary.errors))
                ),
                logging::LogLevel::Error,
            );
        }

        logging::log_display(
            format!("  Duration: {}ms", summary.total_duration_ms),
            logging::LogLevel::Info,
        );
        logging::log_display("=".repeat(80), logging::LogLevel::Info);
    }
}

#[async_trait]
impl TraceRunner for TraceReplayer {
    async fn run_execution_trace(&mut self) -> Result<()> {
        let trace = ExecutionTrace::load(&self.trace_path)?;

        logging::log_display(
            format!(
                "Replaying {} step(s) from {:?}, started {}",
                trace.steps.len(),
                self.trace_path,
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            ),
            logging::LogLevel::Info,
        );

        let results = self.replay(&trace).await;
        let summary = Self::summarize(&results);
        Self::display_results(&results, &summary);
        logging::log_trace_complete(summary.total, summary.errors);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_step_defaults() {
        let json = r#"[{"program": "lottery", "instruction": "join"}]"#;
        let parsed: Vec<TraceStepInput> = serde_json::from_str(json).unwrap();
        let step = TraceStep::from(parsed[0].clone());

        assert_eq!(step.program, "lottery");
        assert_eq!(step.instruction, "join");
        assert_eq!(step.args, "[]");
        assert_eq!(step.label, None);
        assert_eq!(step.expected, None);
    }

    #[test]
    fn test_trace_step_args_accept_value_or_string() {
        let json = r#"[
            {"program": "p", "instruction": "a", "args": [1, "x"]},
            {"program": "p", "instruction": "b", "args": "[2]", "expected": 7}
        ]"#;
        let parsed: Vec<TraceStepInput> = serde_json::from_str(json).unwrap();
        let steps: Vec<TraceStep> = parsed.into_iter().map(TraceStep::from).collect();

        assert_eq!(steps[0].args, r#"[1,"x"]"#);
        assert_eq!(steps[1].args, "[2]");
        assert_eq!(steps[1].expected, Some("7".to_string()));
    }

    #[test]
    fn test_summarize_counts_outcomes() {
        let result = |success: bool, passed: bool| StepResult {
            index: 0,
            label: None,
            call: "p::i()".to_string(),
            output: String::new(),
            success,
            error: if success { None } else { Some("boom".to_string()) },
            expected: None,
            passed,
            duration_ms: 5,
        };

        let results = vec![
            result(true, true),
            result(true, false),
            result(false, false),
        ];

        let summary = TraceReplayer::summarize(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.total_duration_ms, 15);
    }
}
