// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{AttemptReport, Decision, Strategy};

/// Retries every failure. Never selected automatically.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRetry;

impl Strategy for AlwaysRetry {
    fn name(&self) -> &str {
        "always"
    }

    fn decide(&self, _report: &AttemptReport<'_>) -> Decision {
        Decision::RETRY
    }
}

/// Retries only attempts that were killed at their deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutRetry;

impl Strategy for TimeoutRetry {
    fn name(&self) -> &str {
        "timeout"
    }

    fn decide(&self, report: &AttemptReport<'_>) -> Decision {
        if report.output.is_timeout() {
            Decision::RETRY
        } else {
            Decision::GiveUp
        }
    }
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
