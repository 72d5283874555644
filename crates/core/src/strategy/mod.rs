// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry strategies.
//!
//! A strategy is a pure decision function: it looks at a failed attempt and
//! says whether the runner should try again. Strategies hold no per-run
//! state, so a single instance is shared by every session in the process.

mod builtin;
mod pattern;

pub use builtin::{AlwaysRetry, TimeoutRetry};
pub use pattern::PatternStrategy;

use crate::{CommandOutput, CommandSpec};
use std::time::Duration;

/// What a strategy wants done after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Launch again. `delay` replaces the exponential backoff when set.
    Retry { delay: Option<Duration> },
    GiveUp,
}

impl Decision {
    /// Retry after the runner's regular backoff.
    pub const RETRY: Decision = Decision::Retry { delay: None };

    pub fn is_retry(&self) -> bool {
        matches!(self, Decision::Retry { .. })
    }
}

/// Read-only view of a failed attempt handed to strategies.
#[derive(Debug, Clone, Copy)]
pub struct AttemptReport<'a> {
    pub command: &'a CommandSpec,
    /// 1-based number of the attempt that just failed.
    pub attempt: u32,
    pub output: &'a CommandOutput,
}

/// Decides whether a failed attempt is worth repeating.
pub trait Strategy: Send + Sync {
    /// Registry key; unique within a registry.
    fn name(&self) -> &str;

    /// Whether automatic selection should pick this strategy for a program
    /// with the given basename.
    fn applies_to(&self, _basename: &str) -> bool {
        false
    }

    /// Program basenames this strategy is selected for automatically.
    fn auto_programs(&self) -> Vec<String> {
        Vec::new()
    }

    fn decide(&self, report: &AttemptReport<'_>) -> Decision;
}

impl std::fmt::Debug for dyn Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name()).finish()
    }
}
