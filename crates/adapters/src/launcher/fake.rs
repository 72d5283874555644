// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake launcher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{build_command, LaunchError, LaunchRequest, ProcessLauncher};
use async_trait::async_trait;
use parking_lot::Mutex;
use qa_core::CommandOutput;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Scripted result of one launch
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Exit(CommandOutput),
    /// Behaves like an attempt killed at its deadline.
    TimedOut,
    /// Fails to start, like a missing binary.
    SpawnError(String),
}

impl FakeOutcome {
    pub fn exit(status: i32) -> Self {
        Self::Exit(CommandOutput::new(status, Vec::new(), Vec::new()))
    }

    pub fn output(status: i32, stdout: &str, stderr: &str) -> Self {
        Self::Exit(CommandOutput::new(status, stdout, stderr))
    }
}

/// Recorded launch
#[derive(Debug, Clone)]
pub struct LaunchCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub started_at: tokio::time::Instant,
}

struct FakeLauncherState {
    script: VecDeque<FakeOutcome>,
    last: FakeOutcome,
    calls: Vec<LaunchCall>,
}

/// Launcher that returns scripted outcomes without spawning anything.
///
/// Outcomes are consumed in order; once the script runs out the last one
/// repeats. The prepare hook still runs, against a `Command` that is never
/// spawned.
#[derive(Clone)]
pub struct FakeLauncher {
    inner: Arc<Mutex<FakeLauncherState>>,
}

impl Default for FakeLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeLauncher {
    /// Launcher that always succeeds with empty output.
    pub fn new() -> Self {
        Self::scripted([])
    }

    pub fn scripted(outcomes: impl IntoIterator<Item = FakeOutcome>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeLauncherState {
                script: outcomes.into_iter().collect(),
                last: FakeOutcome::exit(0),
                calls: Vec::new(),
            })),
        }
    }

    /// Launcher whose every attempt ends with `outcome`.
    pub fn always(outcome: FakeOutcome) -> Self {
        let launcher = Self::scripted([]);
        launcher.inner.lock().last = outcome;
        launcher
    }

    /// Get all recorded launches
    pub fn calls(&self) -> Vec<LaunchCall> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }
}

#[async_trait]
impl ProcessLauncher for FakeLauncher {
    async fn launch(&self, request: LaunchRequest<'_>) -> Result<CommandOutput, LaunchError> {
        let _ = build_command(&request);

        let outcome = {
            let mut state = self.inner.lock();
            state.calls.push(LaunchCall {
                program: request.command.program().to_string(),
                args: request.command.get_args().to_vec(),
                cwd: request.cwd.map(PathBuf::from),
                timeout: request.timeout,
                started_at: tokio::time::Instant::now(),
            });
            match state.script.pop_front() {
                Some(next) => {
                    state.last = next.clone();
                    next
                }
                None => state.last.clone(),
            }
        };

        match outcome {
            FakeOutcome::Exit(output) => Ok(output),
            FakeOutcome::TimedOut => Ok(CommandOutput::timed_out(Vec::new(), Vec::new())),
            FakeOutcome::SpawnError(message) => Err(LaunchError::Spawn {
                program: request.command.program().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, message),
            }),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
