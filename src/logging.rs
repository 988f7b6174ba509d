//! Structured logging utilities for the workbench.
//!
//! This module provides helper functions for consistent, structured
//! logging across the application using the `tracing` crate.

use std::fmt;

/// Helper function to format and log multi-line output without structured fields.
/// Used for formatted displays like tables and summaries.
pub fn log_display<D: fmt::Display>(message: D, level: LogLevel) {
    let msg = message.to_string();
    match level {
        LogLevel::Info => tracing::info!("{}", msg),
        LogLevel::Warn => tracing::warn!("{}", msg),
        LogLevel::Error => tracing::error!("{}", msg),
        LogLevel::Debug => tracing::debug!("{}", msg),
    }
}

/// Log levels matching tracing crate levels.
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

/// Log entry into a menu level.
pub fn log_menu_entered(level: &str) {
    tracing::debug!(menu = level, "Menu entered");
}

/// Log a dispatched menu action.
pub fn log_menu_dispatch(action: &str) {
    tracing::debug!(action, "Dispatching menu action");
}

/// Log a rejected menu choice.
pub fn log_invalid_choice(menu: &str) {
    tracing::debug!(menu, "Invalid choice rejected");
}

/// Log program discovery.
pub fn log_programs_discovered(count: usize) {
    tracing::info!(count, "Programs discovered");
}

/// Log compilation start.
pub fn log_compile_start(program: &str) {
    tracing::info!(program, "Compiling program");
}

/// Log compilation completion.
pub fn log_compile_complete(program: &str) {
    tracing::info!(program, "Program compiled successfully");
}

/// Log deployment.
pub fn log_deploy_start(program: &str) {
    tracing::info!(program, "Deploying program");
}

/// Log instruction invocation.
pub fn log_instruction_invoked(program: &str, instruction: &str) {
    tracing::info!(program, instruction, "Invoking instruction");
}

/// Log trace file loading.
pub fn log_trace_loaded(path: &str, steps: usize) {
    tracing::info!(trace = path, steps, "Execution trace loaded");
}

/// Log a replayed trace step.
pub fn log_trace_step(index: usize, instruction: &str) {
    tracing::debug!(step = index, instruction, "Trace step replayed");
}

/// Log trace replay completion.
pub fn log_trace_complete(total: usize, errors: usize) {
    tracing::info!(total, errors, "Trace replay completed");
}

/// Log IDL loading.
pub fn log_idl_loaded(program: &str, instructions: usize) {
    tracing::debug!(program, instructions, "IDL loaded");
}

/// Log a derived program address.
pub fn log_pda_derived(program: &str, bump: u8) {
    tracing::info!(program, bump, "Program-derived address found");
}
