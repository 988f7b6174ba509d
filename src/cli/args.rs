use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anchor-workbench")]
#[command(about = "An interactive workbench for Anchor program development", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive workflow menu (default)
    Menu,

    /// Compile (and optionally deploy) workspace programs
    Compile(CompileArgs),

    /// Pick and run a single program interactively
    Run(RunArgs),

    /// Replay an execution trace file
    Trace(TraceArgs),

    /// Derive a program-derived address
    Pda(PdaArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser)]
pub struct CompileArgs {
    /// Program to compile (repeatable; default: all programs)
    #[arg(short, long)]
    pub program: Vec<String>,

    /// Deploy after a successful build
    #[arg(long)]
    pub deploy: bool,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Skip the program menu and run this program
    #[arg(short, long)]
    pub program: Option<String>,
}

#[derive(Parser)]
pub struct TraceArgs {
    /// Trace file to replay (default: from config, then execution_trace.json)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PdaArgs {
    /// Program id as 64 hex characters
    #[arg(long, value_name = "HEX")]
    pub program_id: Option<String>,

    /// Program keypair file to take the program id from
    #[arg(long, value_name = "PATH", conflicts_with = "program_id")]
    pub keypair: Option<PathBuf>,

    /// Seed value, in order (repeatable)
    #[arg(short, long)]
    pub seed: Vec<String>,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Log verbosity selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            return Verbosity::Quiet;
        }
        match self.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Trace,
        }
    }
}
