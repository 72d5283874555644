// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process launchers

mod process;

pub use process::TokioLauncher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLauncher, FakeOutcome, LaunchCall};

use async_trait::async_trait;
use qa_core::{CommandOutput, CommandSpec};
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Error returned by a [`PrepareHook`].
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Per-attempt setup applied to the child's `Command` right before spawn.
///
/// Anything the hook configures (directory, environment, process group)
/// affects only the child, never the calling process.
pub type PrepareHook = Arc<dyn Fn(&mut Command) -> Result<(), HookError> + Send + Sync>;

/// Errors from launch operations
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

// `io::Error` is not `Clone`; copies keep its kind and message.
impl Clone for LaunchError {
    fn clone(&self) -> Self {
        let copy = |e: &std::io::Error| std::io::Error::new(e.kind(), e.to_string());
        match self {
            Self::Spawn { program, source } => Self::Spawn {
                program: program.clone(),
                source: copy(source),
            },
            Self::Wait { program, source } => Self::Wait {
                program: program.clone(),
                source: copy(source),
            },
        }
    }
}

/// Everything needed to run one attempt.
#[derive(Clone, Copy)]
pub struct LaunchRequest<'a> {
    pub command: &'a CommandSpec,
    /// Effective working directory; `None` inherits the caller's.
    pub cwd: Option<&'a Path>,
    /// Kill the process and report [`qa_core::TIMEOUT_STATUS`] after this long.
    pub timeout: Option<Duration>,
    pub prepare: Option<&'a PrepareHook>,
}

impl<'a> LaunchRequest<'a> {
    pub fn new(command: &'a CommandSpec) -> Self {
        Self {
            command,
            cwd: command.get_cwd(),
            timeout: None,
            prepare: None,
        }
    }
}

/// Runs a single attempt of a command to completion.
#[async_trait]
pub trait ProcessLauncher: Clone + Send + Sync + 'static {
    /// Run the command once. A non-zero exit or a timeout is an `Ok`
    /// outcome; only failing to start or reap the process is an error.
    async fn launch(&self, request: LaunchRequest<'_>) -> Result<CommandOutput, LaunchError>;
}

/// Build the child's `Command` and run the prepare hook on it.
///
/// Hook failures are logged and the attempt goes ahead.
pub fn build_command(request: &LaunchRequest<'_>) -> Command {
    let spec = request.command;
    let mut cmd = Command::new(spec.program());
    cmd.args(spec.get_args())
        .envs(spec.get_env())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    // Own group, so a timeout kill reaches every descendant.
    #[cfg(unix)]
    cmd.process_group(0);
    if let Some(dir) = request.cwd {
        cmd.current_dir(dir);
    }
    if let Some(hook) = request.prepare {
        if let Err(e) = hook(&mut cmd) {
            tracing::warn!(program = spec.program(), error = %e, "before-attempt hook failed");
        }
    }
    cmd
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
