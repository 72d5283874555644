// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! qarun - run commands with timeouts and automatic retries

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod config;
mod env;
mod exit_error;
mod logging;
mod output;
mod table;

use output::OutputFormat;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{run, strategies};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "qarun",
    version,
    about = "Run commands with per-attempt timeouts and automatic retries"
)]
struct Cli {
    /// Configuration file (default: <config dir>/qarun/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command, retrying failures according to a policy
    Run(run::RunArgs),
    /// List the registered retry strategies
    Strategies,
}

fn cli_command() -> clap::Command {
    Cli::command()
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, the
/// "Caused by" chain is skipped. Otherwise the full chain is rendered so
/// context isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        cli_command().print_help()?;
        println!();
        return Ok(());
    };

    let log_file = cli.log_file.or_else(env::log_file);
    let _guard = logging::init(log_file.as_deref())?;

    let config = config::load(cli.config.as_deref()).map_err(exit_error::ExitError::config)?;

    match command {
        Commands::Run(args) => run::handle(args, &config, format).await?,
        Commands::Strategies => strategies::handle(&config, format)?,
    }

    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
