mod cli;
mod commands;
mod interactive;
mod interrupt;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};
use commands::CommandOptions;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(status) => ExitCode::from(u8::try_from(status).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    interrupt::install()?;

    let options = CommandOptions {
        verbose: cli.verbose,
        dry_run: cli.dry_run,
        repository: cli.repo.as_deref(),
        config_path: cli.config.as_deref(),
        no_config: cli.no_config,
        conflict: cli.conflict.map(Into::into),
        copy_policy: cli.copy_policy.map(Into::into),
    };

    match &cli.command {
        Commands::Init => commands::Init::execute(&options),
        Commands::Track { paths } => commands::Track::execute(paths, &options),
        Commands::SyncEnter => commands::SyncEnter::execute(&options),
        Commands::SyncExit { since } => commands::SyncExit::execute(since.as_deref(), &options),
        Commands::Shell => commands::Shell::execute(&options),
        Commands::External(args) => commands::Passthrough::execute(args, &options),
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
