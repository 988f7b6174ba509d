pub mod cli;
pub mod config;
pub mod logging;
pub mod menu;
pub mod ui;
pub mod workbench;

use miette::Diagnostic;

pub use menu::dispatcher::MenuDispatcher;
pub use workbench::Toolkit;

/// Result type alias for the workbench
pub type Result<T> = miette::Result<T>;

/// Error types for the workbench
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum WorkbenchError {
    #[error("Toolchain invocation failed: {0}")]
    #[diagnostic(
        code(workbench::toolchain_failed),
        help("Make sure the `anchor` and `solana` binaries are installed and on PATH, or set their locations in .anchor-workbench.toml.")
    )]
    ToolchainError(String),

    #[error("Failed to load IDL: {0}")]
    #[diagnostic(
        code(workbench::idl_load_failed),
        help("IDL files are written by `anchor build` under target/idl/. Compile the workspace first.")
    )]
    IdlError(String),

    #[error("Failed to load execution trace: {0}")]
    #[diagnostic(
        code(workbench::trace_load_failed),
        help("The trace file must be a JSON array of steps with `program`, `instruction` and `args` fields.")
    )]
    TraceError(String),

    #[error("Failed to load program keypair: {0}")]
    #[diagnostic(
        code(workbench::keypair_load_failed),
        help("Anchor writes program keypairs under target/deploy/ as a JSON array of 64 bytes. Deploy keypairs are created by `anchor build`.")
    )]
    KeypairError(String),

    #[error("Address derivation failed: {0}")]
    #[diagnostic(
        code(workbench::pda_derivation_failed),
        help("Seeds are limited to 16 entries of at most 32 bytes each.")
    )]
    PdaError(String),

    #[error("Console error: {0}")]
    #[diagnostic(
        code(workbench::console_error),
        help("The workbench needs an interactive terminal for menu and prompt input.")
    )]
    ConsoleError(String),

    #[error("File operation failed: {0}")]
    #[diagnostic(
        code(workbench::file_error),
        help("Check if you have necessary permissions and that the path exists.")
    )]
    FileError(String),
}
