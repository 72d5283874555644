// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred result of a spawned session

use crate::RunError;
use qa_core::CommandOutput;
use tokio::task::JoinHandle;

/// Handle to a session running on the tokio runtime.
///
/// Awaiting [`wait`](PendingRun::wait) suspends only the caller; other
/// sessions keep running. Dropping the handle detaches the session.
pub struct PendingRun {
    handle: JoinHandle<Result<CommandOutput, RunError>>,
}

impl PendingRun {
    pub(crate) fn new(handle: JoinHandle<Result<CommandOutput, RunError>>) -> Self {
        Self { handle }
    }

    /// Wait for the session's terminal result.
    pub async fn wait(self) -> Result<CommandOutput, RunError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(RunError::Aborted("session cancelled".to_string())),
            Err(e) => Err(RunError::Aborted(format!("session task failed: {}", e))),
        }
    }

    /// Call `f` with the terminal result once it is ready.
    pub fn on_complete<F>(self, f: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<CommandOutput, RunError>) + Send + 'static,
    {
        tokio::spawn(async move { f(self.wait().await) })
    }

    /// Stop the session. A running attempt's process is killed when its
    /// launch future is dropped.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
