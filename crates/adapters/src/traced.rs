// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced launcher wrapper for consistent observability

use crate::launcher::{LaunchError, LaunchRequest, ProcessLauncher};
use async_trait::async_trait;
use qa_core::CommandOutput;
use tracing::Instrument;

/// Wrapper that adds tracing to any ProcessLauncher
#[derive(Clone)]
pub struct TracedLauncher<L> {
    inner: L,
}

impl<L> TracedLauncher<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<L: ProcessLauncher> ProcessLauncher for TracedLauncher<L> {
    async fn launch(&self, request: LaunchRequest<'_>) -> Result<CommandOutput, LaunchError> {
        let span = tracing::info_span!(
            "process.launch",
            program = request.command.program(),
            cwd = ?request.cwd,
        );
        async {
            tracing::debug!(
                command = %request.command,
                timeout_ms = ?request.timeout.map(|t| t.as_millis() as u64),
                "starting"
            );
            let start = std::time::Instant::now();
            let result = self.inner.launch(request).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(out) if out.is_timeout() => tracing::warn!(elapsed_ms, "timed out"),
                Ok(out) => tracing::info!(
                    elapsed_ms,
                    exit_status = out.exit_status,
                    stdout_len = out.stdout.len(),
                    stderr_len = out.stderr.len(),
                    "exited"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "launch failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
