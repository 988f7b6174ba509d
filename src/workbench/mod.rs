/// Workbench collaborators invoked from the menu dispatcher
///
/// Four operations back the menu leaves: compiling workspace programs,
/// running one program interactively, replaying an execution trace and
/// deriving program addresses. The dispatcher consumes them through the
/// traits below so the menu contracts can be tested with recording fakes.
pub mod compiler;
pub mod idl;
pub mod interactive;
pub mod pda;
pub mod toolchain;
pub mod trace;

use crate::config::Config;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub use compiler::AnchorCompiler;
pub use interactive::InteractiveSession;
pub use pda::PdaTool;
pub use toolchain::Toolchain;
pub use trace::TraceReplayer;

/// Compile (and optionally deploy) the workspace programs. Synchronous;
/// blocks on the external toolchain.
pub trait ProgramCompiler {
    fn compile_programs(&mut self) -> Result<()>;
}

/// Let the operator pick and run a single program. Synchronous and
/// interactive; reads operator input itself.
pub trait InteractiveRunner {
    fn choose_program_to_run(&mut self) -> Result<()>;
}

/// Replay a full execution trace. Asynchronous; the dispatcher awaits
/// completion before proceeding.
#[async_trait]
pub trait TraceRunner {
    async fn run_execution_trace(&mut self) -> Result<()>;
}

/// Let the operator pick a program and derive an address for it.
/// Synchronous and interactive.
pub trait PdaGenerator {
    fn choose_program_for_derivation(&mut self) -> Result<()>;
}

/// One implementation of each collaborator, as consumed by the dispatcher.
pub struct Toolkit {
    pub compiler: Box<dyn ProgramCompiler>,
    pub runner: Box<dyn InteractiveRunner>,
    pub tracer: Box<dyn TraceRunner>,
    pub pda: Box<dyn PdaGenerator>,
}

impl Toolkit {
    /// Assemble the production toolkit from the loaded configuration.
    pub fn assemble(config: &Config) -> Result<Toolkit> {
        let toolchain = Arc::new(Toolchain::from_config(config));

        Ok(Toolkit {
            compiler: Box::new(AnchorCompiler::new(Arc::clone(&toolchain), config)?),
            runner: Box::new(InteractiveSession::new(Arc::clone(&toolchain), config)?),
            tracer: Box::new(TraceReplayer::new(
                Box::new(trace::ScriptInvoker::new(Arc::clone(&toolchain))),
                config.trace_file(),
            )),
            pda: Box::new(PdaTool::new(config)?),
        })
    }
}
