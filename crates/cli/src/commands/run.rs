// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `qarun run [options] -- <program> [args]` - Run a command reliably

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use qa_adapters::{TokioLauncher, TracedLauncher};
use qa_core::{format_delay, CommandSpec, QaConfig, RetryPolicy, RunOptions};
use qa_engine::{RetryEvent, RunError, Session};

use crate::exit_error::{ExitError, INTERRUPTED_EXIT_CODE};
use crate::output::{self, OutputFormat, RunReport};

#[derive(Args)]
pub struct RunArgs {
    /// Kill an attempt that runs longer than this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Working directory for the command
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Retry policy: `true`/`auto`, `false`, or comma-separated strategy names
    #[arg(long, value_name = "POLICY")]
    pub retry: Option<RetryPolicy>,

    /// Maximum number of retries after the first attempt
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Delay before the first retry, doubled for each further retry
    #[arg(long, value_name = "MS")]
    pub backoff_base_ms: Option<u64>,

    /// Extra environment for the command (key=value)
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub env: Vec<(String, String)>,

    /// Exit with an error when the command still fails after all retries
    #[arg(long)]
    pub fail_fatally: bool,

    /// Program and its arguments
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "PROGRAM"
    )]
    pub command: Vec<String>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid key=value: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

impl RunArgs {
    /// Apply flags on top of the configured defaults.
    pub fn options(&self, mut options: RunOptions) -> RunOptions {
        if let Some(secs) = self.timeout {
            options.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(dir) = &self.cwd {
            options.cwd = Some(dir.clone());
        }
        if let Some(policy) = &self.retry {
            options.retry = policy.clone();
        }
        if let Some(n) = self.max_retries {
            options.max_retries = n;
        }
        if let Some(ms) = self.backoff_base_ms {
            options.backoff.base = Duration::from_millis(ms);
        }
        if self.fail_fatally {
            options.fail_fatally = true;
        }
        options
    }

    pub fn command_spec(&self) -> CommandSpec {
        let (program, args) = match self.command.split_first() {
            Some((program, args)) => (program.as_str(), args),
            None => ("", &[][..]),
        };
        CommandSpec::new(program)
            .args(args.iter().cloned())
            .envs(self.env.iter().cloned())
    }
}

/// One-line stderr notice for a scheduled retry.
pub fn retry_notice(program: &str, event: &RetryEvent) -> String {
    let outcome = if event.status == qa_core::TIMEOUT_STATUS {
        "timed out".to_string()
    } else {
        format!("failed with status {}", event.status)
    };
    format!(
        "qarun: {} attempt {} {}, retrying in {} ({})",
        program,
        event.attempt,
        outcome,
        format_delay(event.delay),
        event.strategy
    )
}

pub async fn handle(args: RunArgs, config: &QaConfig, format: OutputFormat) -> Result<()> {
    let registry = config.registry().map_err(ExitError::config)?;
    let options = args.options(config.run_options().map_err(ExitError::config)?);
    let command = args.command_spec();
    let program = command.basename().to_string();

    let launcher = TracedLauncher::new(TokioLauncher::new());
    let mut session = Session::builder(command, options)
        .registry(&registry)
        .on_retry(move |event| eprintln!("{}", retry_notice(&program, event)))
        .build(launcher)
        .map_err(|e| match e {
            RunError::Config(e) => anyhow::Error::new(ExitError::config(e)),
            other => anyhow::Error::new(other),
        })?;

    // Biased so the interrupt handler is installed before the first spawn.
    // Dropping the run kills the in-flight attempt's process group.
    let result = tokio::select! {
        biased;
        Ok(()) = tokio::signal::ctrl_c() => {
            return Err(ExitError::new(INTERRUPTED_EXIT_CODE, String::new()).into());
        }
        result = session.run() => result?,
    };
    let code = output::exit_code(&result);

    match format {
        OutputFormat::Text => {
            output::replay(&result, &mut std::io::stdout(), &mut std::io::stderr())?;
        }
        OutputFormat::Json => {
            let report = RunReport::new(&result, session.attempts());
            output::print_json(&report, &mut std::io::stdout())?;
        }
    }

    if code != 0 {
        return Err(ExitError::silent(code).into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
