// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reliable run session.
//!
//! A [`Session`] owns one logical invocation: the command, its options, the
//! strategies resolved at construction, and a small state machine:
//!
//! ```text
//! Attempting ──success / give up / ceiling──▶ Done
//!     │  ▲
//!  retry │ delay elapsed
//!     ▼  │
//! AwaitingRetryDelay
//! ```
//!
//! Attempts are strictly sequential. Each waits on the launcher, which
//! races process exit against the attempt deadline, and the retry delay is a
//! plain timer on the same runtime, so many sessions can share one thread.

use crate::{PendingRun, RunError};
use qa_adapters::{HookError, LaunchError, LaunchRequest, PrepareHook, ProcessLauncher};
use qa_core::{
    format_delay, AttemptReport, CommandOutput, CommandSpec, Decision, RunOptions, Strategy,
    StrategyRegistry,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

/// Callback fired once per retry decision, before the delay starts.
pub type RetryCallback = Arc<dyn Fn(&RetryEvent) + Send + Sync>;

/// Details of a scheduled retry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryEvent {
    /// Strategy that asked for the retry.
    pub strategy: String,
    /// 1-based number of the attempt that failed.
    pub attempt: u32,
    /// Exit status of that attempt (`-1` for a timeout).
    pub status: i32,
    /// Wait before the next attempt.
    pub delay: Duration,
}

#[derive(Debug, Clone)]
enum SessionState {
    Attempting { retries: u32 },
    AwaitingRetryDelay { retries: u32, delay: Duration },
    Done(CommandOutput),
    /// The launcher could not start or reap the process.
    Failed(LaunchError),
}

/// One reliable invocation of a command.
pub struct Session<L> {
    command: CommandSpec,
    options: RunOptions,
    strategies: Vec<Arc<dyn Strategy>>,
    launcher: L,
    before_attempt: Option<PrepareHook>,
    on_retry: Option<RetryCallback>,
    state: SessionState,
    attempts: u32,
}

/// Configures a [`Session`]; strategy resolution happens in
/// [`build`](SessionBuilder::build).
pub struct SessionBuilder<'r> {
    command: CommandSpec,
    options: RunOptions,
    registry: Option<&'r StrategyRegistry>,
    before_attempt: Option<PrepareHook>,
    on_retry: Option<RetryCallback>,
}

impl<'r> SessionBuilder<'r> {
    /// Resolve strategies against `registry` instead of the process-wide one.
    pub fn registry(mut self, registry: &'r StrategyRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Setup run on each attempt's `Command` just before it is spawned.
    pub fn before_attempt<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Command) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.before_attempt = Some(Arc::new(hook));
        self
    }

    pub fn on_retry<F>(mut self, callback: F) -> Self
    where
        F: Fn(&RetryEvent) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(callback));
        self
    }

    /// Validate options and resolve the retry policy. Nothing is spawned
    /// here, so a configuration error never has process side effects.
    pub fn build<L: ProcessLauncher>(self, launcher: L) -> Result<Session<L>, RunError> {
        self.options.validate()?;
        let registry = match self.registry {
            Some(registry) => registry,
            None => StrategyRegistry::global(),
        };
        let strategies = registry.resolve(&self.options.retry, self.command.program())?;
        if strategies.is_empty() && !self.options.retry.is_disabled() {
            tracing::debug!(
                program = self.command.program(),
                "no applicable retry strategy, running once"
            );
        }
        Ok(Session {
            command: self.command,
            options: self.options,
            strategies,
            launcher,
            before_attempt: self.before_attempt,
            on_retry: self.on_retry,
            state: SessionState::Attempting { retries: 0 },
            attempts: 0,
        })
    }
}

impl Session<()> {
    pub fn builder<'r>(command: CommandSpec, options: RunOptions) -> SessionBuilder<'r> {
        SessionBuilder {
            command,
            options,
            registry: None,
            before_attempt: None,
            on_retry: None,
        }
    }
}

impl<L: ProcessLauncher> Session<L> {
    /// Shorthand for `Session::builder(command, options).build(launcher)`.
    pub fn new(command: CommandSpec, options: RunOptions, launcher: L) -> Result<Self, RunError> {
        Session::<()>::builder(command, options).build(launcher)
    }

    /// Register (or replace) the retry notification callback.
    pub fn set_retry_callback<F>(&mut self, callback: F)
    where
        F: Fn(&RetryEvent) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(callback));
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// Names of the strategies this session consults, in order.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Processes launched so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Retries performed so far.
    pub fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, SessionState::Done(_) | SessionState::Failed(_))
    }

    /// Drive the session to its single terminal result.
    ///
    /// Calling `run` again on a finished session returns the same outcome
    /// without launching anything.
    pub async fn run(&mut self) -> Result<CommandOutput, RunError> {
        loop {
            match &self.state {
                SessionState::Done(output) => return self.conclude(output.clone()),
                SessionState::Failed(e) => return Err(RunError::Launch(e.clone())),
                SessionState::AwaitingRetryDelay { retries, delay } => {
                    let (retries, delay) = (*retries, *delay);
                    tokio::time::sleep(delay).await;
                    self.state = SessionState::Attempting { retries };
                }
                SessionState::Attempting { retries } => {
                    let retries = *retries;
                    match self.attempt().await {
                        Ok(output) => self.state = self.after_attempt(retries, output),
                        Err(e) => {
                            self.state = SessionState::Failed(e.clone());
                            return Err(RunError::Launch(e));
                        }
                    }
                }
            }
        }
    }

    /// Run the session on the tokio runtime and hand back a handle to its
    /// eventual result.
    pub fn spawn(mut self) -> PendingRun {
        PendingRun::new(tokio::spawn(async move { self.run().await }))
    }

    async fn attempt(&mut self) -> Result<CommandOutput, LaunchError> {
        self.attempts += 1;
        tracing::debug!(
            command = %self.command,
            attempt = self.attempts,
            "launching attempt"
        );
        let request = LaunchRequest {
            command: &self.command,
            cwd: self.options.cwd.as_deref().or(self.command.get_cwd()),
            timeout: self.options.timeout,
            prepare: self.before_attempt.as_ref(),
        };
        self.launcher.launch(request).await
    }

    fn after_attempt(&self, retries: u32, output: CommandOutput) -> SessionState {
        if output.success() || self.strategies.is_empty() {
            return SessionState::Done(output);
        }
        if retries >= self.options.max_retries {
            tracing::warn!(
                command = %self.command,
                retries,
                status = output.exit_status,
                "retry ceiling reached"
            );
            return SessionState::Done(output);
        }

        let report = AttemptReport {
            command: &self.command,
            attempt: self.attempts,
            output: &output,
        };
        let verdict = self.strategies.iter().find_map(|s| match s.decide(&report) {
            Decision::Retry { delay } => Some((s, delay)),
            Decision::GiveUp => None,
        });
        let Some((strategy, delay_override)) = verdict else {
            tracing::debug!(
                command = %self.command,
                status = output.exit_status,
                "no strategy wants a retry"
            );
            return SessionState::Done(output);
        };

        let retries = retries + 1;
        let delay = delay_override.unwrap_or_else(|| self.options.backoff.delay(retries));
        let event = RetryEvent {
            strategy: strategy.name().to_string(),
            attempt: self.attempts,
            status: output.exit_status,
            delay,
        };
        tracing::warn!(
            command = %self.command,
            strategy = %event.strategy,
            attempt = event.attempt,
            status = event.status,
            delay = %format_delay(delay),
            "attempt failed, retrying"
        );
        if let Some(callback) = &self.on_retry {
            callback(&event);
        }
        SessionState::AwaitingRetryDelay { retries, delay }
    }

    fn conclude(&self, output: CommandOutput) -> Result<CommandOutput, RunError> {
        if self.options.fail_fatally && !output.success() {
            return Err(RunError::CommandFailed {
                command: self.command.display(),
                status: output.exit_status,
            });
        }
        Ok(output)
    }
}

/// Build and run a session in one call.
pub async fn run_command<L: ProcessLauncher>(
    command: CommandSpec,
    options: RunOptions,
    launcher: L,
) -> Result<CommandOutput, RunError> {
    Session::new(command, options, launcher)?.run().await
}

#[cfg(test)]
#[path = "session_tests/mod.rs"]
mod tests;
