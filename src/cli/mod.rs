pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompileArgs, CompletionsArgs, PdaArgs, RunArgs, TraceArgs, Verbosity,
};
