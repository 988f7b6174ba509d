use anchor_workbench::cli::{Cli, Commands, Verbosity};
use anchor_workbench::ui::formatter::Formatter;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_tracing(verbosity: Verbosity) {
    let log_level = verbosity.to_log_level();
    let fallback_filter = format!("anchor_workbench={}", log_level);

    let use_json = std::env::var("ANCHOR_WORKBENCH_JSON").is_ok();

    if use_json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| fallback_filter.clone().into()),
            )
            .with(json_layer)
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .without_time()
            .with_target(false)
            .with_level(false);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| fallback_filter.into()),
            )
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    Formatter::configure_colors_from_env();

    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    initialize_tracing(verbosity);

    let config = anchor_workbench::config::Config::load_or_default();

    match cli.command {
        Some(Commands::Compile(args)) => anchor_workbench::cli::commands::compile(args, &config),
        Some(Commands::Run(args)) => anchor_workbench::cli::commands::run(args, &config),
        Some(Commands::Trace(args)) => {
            anchor_workbench::cli::commands::trace(args, &config).await
        }
        Some(Commands::Pda(args)) => anchor_workbench::cli::commands::pda(args, &config),
        Some(Commands::Completions(args)) => {
            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "anchor-workbench", &mut io::stdout());
            Ok(())
        }
        Some(Commands::Menu) | None => anchor_workbench::cli::commands::menu(&config).await,
    }
}
