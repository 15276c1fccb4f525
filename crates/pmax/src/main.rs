//! `pmax` binary entry point: parse, init tracing, dispatch.

mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = &cli.global;
    match cli.command {
        Command::Status => commands::status::handle(global).await,
        Command::Events(args) => commands::events::handle(global, args).await,
        Command::Sensors => commands::sensors::handle(global).await,
        Command::Troubles => commands::maintenance::handle_troubles(global).await,
        Command::Alerts => commands::maintenance::handle_alerts(global).await,
        Command::Arm(args) => commands::arm::handle_arm(global, args.mode).await,
        Command::Disarm => commands::arm::handle_disarm(global).await,
        Command::Verify => commands::arm::handle_verify(global).await,
        Command::Watch(args) => commands::watch::handle(global, args).await,
    }
}

/// Map `-v` counts onto an `EnvFilter`; `RUST_LOG` wins when set.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "pmax=info,pmax_core=info,pmax_api=info",
        2 => "pmax=debug,pmax_core=debug,pmax_api=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
