// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal outcome of a command attempt

use serde::Serialize;
use std::borrow::Cow;

/// Exit status synthesized when the runner kills an attempt for exceeding
/// its timeout. Real exit statuses are never negative.
pub const TIMEOUT_STATUS: i32 = -1;

/// Exit status plus everything the process wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    pub exit_status: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn new(exit_status: i32, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Output for an attempt that was killed at its deadline.
    pub fn timed_out(stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            exit_status: TIMEOUT_STATUS,
            stdout,
            stderr,
        }
    }

    /// Convert a finished process's status into the runner's integer form.
    ///
    /// A process terminated by a signal has no exit code; it is reported as
    /// `128 + signal`, the way shells do, so it can never collide with
    /// [`TIMEOUT_STATUS`].
    pub fn from_process(status: std::process::ExitStatus, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            exit_status: status_code(status),
            stdout,
            stderr,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_status == 0
    }

    pub fn is_timeout(&self) -> bool {
        self.exit_status == TIMEOUT_STATUS
    }

    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

#[cfg(unix)]
fn status_code(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 128,
    }
}

#[cfg(not(unix))]
fn status_code(status: std::process::ExitStatus) -> i32 {
    // Windows exit codes are u32; wrap-around values stay non-negative.
    status.code().map_or(1, |code| code & i32::MAX)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
