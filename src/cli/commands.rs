use crate::cli::args::{CompileArgs, PdaArgs, RunArgs, TraceArgs};
use crate::config::Config;
use crate::menu::console::RustylineConsole;
use crate::menu::dispatcher::MenuDispatcher;
use crate::ui::formatter::Formatter;
use crate::workbench::compiler::discover_programs;
use crate::workbench::pda::{
    find_program_address, read_program_id_from_keypair, PdaTool, Pubkey,
};
use crate::workbench::trace::{ScriptInvoker, TraceReplayer};
use crate::workbench::{
    InteractiveSession, PdaGenerator, Toolchain, Toolkit, TraceRunner,
};
use crate::{Result, WorkbenchError};
use std::sync::Arc;

fn print_info(message: impl AsRef<str>) {
    println!("{}", Formatter::info(message));
}

fn print_success(message: impl AsRef<str>) {
    println!("{}", Formatter::success(message));
}

/// Execute the menu command: the interactive workflow entry point
pub async fn menu(config: &Config) -> Result<()> {
    let mut toolkit = Toolkit::assemble(config)?;
    let mut console = RustylineConsole::new()?;

    let mut dispatcher = MenuDispatcher::new(&mut console, &mut toolkit);
    dispatcher.run().await
}

/// Execute the compile command without going through the menu
pub fn compile(args: CompileArgs, config: &Config) -> Result<()> {
    let toolchain = Toolchain::from_config(config);
    toolchain.log_versions();

    let deploy = args.deploy || config.deploy_after_build();

    if args.program.is_empty() {
        print_info("Compiling all programs");
        toolchain.build(None)?;
        if deploy {
            toolchain.deploy(None)?;
        }
        print_success("Workspace compiled");
        return Ok(());
    }

    let known = discover_programs(&config.programs_dir())?;
    for name in &args.program {
        if !known.iter().any(|p| &p.name == name) {
            return Err(WorkbenchError::FileError(format!(
                "Program '{}' not found under {:?}",
                name,
                config.programs_dir()
            ))
            .into());
        }
    }

    for name in &args.program {
        print_info(format!("Compiling {}", name));
        toolchain.build(Some(name.as_str()))?;
        if deploy {
            toolchain.deploy(Some(name.as_str()))?;
        }
        print_success(format!("Compiled {}", name));
    }

    Ok(())
}

/// Execute the run command: the interactive runner without the menu
pub fn run(args: RunArgs, config: &Config) -> Result<()> {
    let toolchain = Arc::new(Toolchain::from_config(config));
    let mut session = InteractiveSession::new(toolchain, config)?;
    session.run_program(args.program.as_deref())
}

/// Execute the trace command: replay an execution trace file
pub async fn trace(args: TraceArgs, config: &Config) -> Result<()> {
    let path = args.file.unwrap_or_else(|| config.trace_file());
    let toolchain = Arc::new(Toolchain::from_config(config));
    let mut replayer = TraceReplayer::new(Box::new(ScriptInvoker::new(toolchain)), path);
    replayer.run_execution_trace().await
}

/// Execute the pda command. With a program id (or keypair) and seeds the
/// derivation is non-interactive; otherwise it drops into the same
/// interactive flow the menu offers.
pub fn pda(args: PdaArgs, config: &Config) -> Result<()> {
    let program_id = match (&args.program_id, &args.keypair) {
        (Some(hex_id), _) => Some(Pubkey::from_hex(hex_id)?),
        (None, Some(path)) => Some(read_program_id_from_keypair(path)?),
        (None, None) => None,
    };

    let Some(program_id) = program_id else {
        if !args.seed.is_empty() {
            return Err(WorkbenchError::PdaError(
                "Seeds given without --program-id or --keypair".to_string(),
            )
            .into());
        }
        let mut tool = PdaTool::new(config)?;
        return tool.choose_program_for_derivation();
    };

    let seeds: Vec<&[u8]> = args.seed.iter().map(|s| s.as_bytes()).collect();
    let (address, bump) = find_program_address(&seeds, &program_id)?;

    print_info(format!("Program id: {}", program_id));
    print_success(format!(
        "Derived address: {}",
        Formatter::format_derived_address(&address.to_string(), bump)
    ));

    Ok(())
}
