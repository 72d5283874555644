// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launcher backed by `tokio::process`.

use super::{build_command, LaunchError, LaunchRequest, ProcessLauncher};
use async_trait::async_trait;
use parking_lot::Mutex;
use qa_core::CommandOutput;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::task::JoinHandle;

/// Spawns real processes, captures both output streams, and enforces the
/// per-attempt timeout by killing the child.
#[derive(Debug, Clone)]
pub struct TokioLauncher {
    output_grace: Duration,
}

impl Default for TokioLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl TokioLauncher {
    pub fn new() -> Self {
        Self {
            output_grace: crate::env::output_grace(),
        }
    }

    /// How long to keep draining stdout/stderr after the child is gone.
    ///
    /// Descendants that inherited the pipes can hold them open after the
    /// child exits; whatever arrived within the grace period is kept.
    pub fn output_grace(mut self, grace: Duration) -> Self {
        self.output_grace = grace;
        self
    }
}

#[async_trait]
impl ProcessLauncher for TokioLauncher {
    async fn launch(&self, request: LaunchRequest<'_>) -> Result<CommandOutput, LaunchError> {
        let program = request.command.program();
        let mut child = build_command(&request)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Declared after `child` so it drops first, while the pid is still ours.
        let mut group = ProcessGroup::of(&child);
        let stdout = Capture::start(child.stdout.take());
        let stderr = Capture::start(child.stderr.take());

        // Whichever of exit and deadline comes first drops the other.
        let exited = match request.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait()).await.ok(),
            None => Some(child.wait().await),
        };

        match exited {
            Some(status) => {
                let status = status.map_err(|source| LaunchError::Wait {
                    program: program.to_string(),
                    source,
                })?;
                group.release();
                let (stdout, stderr) = tokio::join!(
                    stdout.finish(self.output_grace),
                    stderr.finish(self.output_grace)
                );
                Ok(CommandOutput::from_process(status, stdout, stderr))
            }
            None => {
                tracing::warn!(
                    program,
                    pid = ?child.id(),
                    timeout_ms = ?request.timeout.map(|t| t.as_millis() as u64),
                    "attempt timed out, killing"
                );
                group.kill(&mut child, program);
                // Reap so no zombie outlives the attempt.
                match child.wait().await {
                    Ok(_) => group.release(),
                    Err(e) => tracing::warn!(program, error = %e, "failed to reap killed process"),
                }
                let (stdout, stderr) = tokio::join!(
                    stdout.finish(self.output_grace),
                    stderr.finish(self.output_grace)
                );
                Ok(CommandOutput::timed_out(stdout, stderr))
            }
        }
    }
}

/// The child's process group (unix), SIGKILLed on drop until the child has
/// been reaped. Covers attempts abandoned mid-flight, e.g. on interrupt.
struct ProcessGroup {
    pgid: Option<i32>,
}

impl ProcessGroup {
    fn of(child: &Child) -> Self {
        Self {
            pgid: child.id().and_then(|pid| i32::try_from(pid).ok()),
        }
    }

    /// The leader was reaped, so its id may be reused from here on.
    fn release(&mut self) {
        self.pgid = None;
    }

    /// Kill every process in the group, or only the child when the group
    /// is gone or a prepare hook moved the child elsewhere.
    fn kill(&self, child: &mut Child, program: &str) {
        if let Err(e) = self.signal_kill() {
            tracing::debug!(program, error = %e, "group kill failed, killing child only");
            if let Err(e) = child.start_kill() {
                tracing::warn!(program, error = %e, "kill failed (may have just exited)");
            }
        }
    }

    #[cfg(unix)]
    fn signal_kill(&self) -> Result<(), String> {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        let pgid = self.pgid.ok_or("no process group")?;
        killpg(Pid::from_raw(pgid), Signal::SIGKILL).map_err(|e| e.to_string())
    }

    #[cfg(not(unix))]
    fn signal_kill(&self) -> Result<(), String> {
        Err("process groups are unix-only".to_string())
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        if self.pgid.is_some() {
            let _ = self.signal_kill();
        }
    }
}

/// Background reader filling a shared buffer, so partial output survives
/// even when the reader has to be abandoned.
struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
    task: Option<JoinHandle<()>>,
}

impl Capture {
    fn start<R>(pipe: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let task = pipe.map(|mut pipe| {
            let sink = Arc::clone(&buf);
            tokio::spawn(async move {
                let mut chunk = [0u8; 8192];
                loop {
                    match pipe.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => sink.lock().extend_from_slice(&chunk[..n]),
                    }
                }
            })
        });
        Self { buf, task }
    }

    async fn finish(mut self, grace: Duration) -> Vec<u8> {
        if let Some(task) = self.task.take() {
            let abort = task.abort_handle();
            if tokio::time::timeout(grace, task).await.is_err() {
                abort.abort();
            }
        }
        std::mem::take(&mut *self.buf.lock())
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
