// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that carry a specific process exit code.

use std::fmt;

/// Exit code for configuration problems (bad file, unknown strategy, ...).
pub const CONFIG_EXIT_CODE: i32 = 2;

/// Exit code after an interrupt (128 + SIGINT), as shells report it.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// An error that makes `main` exit with `code`.
///
/// An empty message exits silently, which is how a child's own non-zero
/// status is passed through.
#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn silent(code: i32) -> Self {
        Self::new(code, String::new())
    }

    pub fn config(err: impl fmt::Display) -> Self {
        Self::new(CONFIG_EXIT_CODE, err.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
