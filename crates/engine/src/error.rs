// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for reliable runs

use qa_adapters::LaunchError;
use qa_core::ConfigError;
use thiserror::Error;

/// Errors that end a reliable run
#[derive(Debug, Error)]
pub enum RunError {
    /// Raised at construction, before any process is spawned.
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
    /// Non-zero terminal status of a session built with `fail_fatally`.
    #[error("command failed with exit status {status}: {command}")]
    CommandFailed { command: String, status: i32 },
    #[error("reliable run aborted: {0}")]
    Aborted(String),
}

impl RunError {
    pub fn is_config(&self) -> bool {
        matches!(self, RunError::Config(_))
    }
}
