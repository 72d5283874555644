// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Data-driven strategy matching captured output against regexes.

use super::{AttemptReport, Decision, Strategy};
use crate::ConfigError;
use regex::RegexSet;
use std::sync::LazyLock;
use std::time::Duration;

/// Output fragments of transient network trouble, shared by most tools
/// that talk to a remote host.
const NETWORK_PATTERNS: &[&str] = &[
    r"(?i)connection (reset|refused|timed out)",
    r"(?i)could not resolve host",
    r"(?i)temporary failure in name resolution",
    r"(?i)the remote end hung up unexpectedly",
    r"(?i)early eof",
    r"(?i)operation timed out",
    r"(?i)network is unreachable",
    r"(?i)broken pipe",
];

const NETWORK_PROGRAMS: &[&str] = &["git", "scp", "ssh", "rsync", "curl", "wget"];

// Allow expect here as the patterns are constants covered by tests
#[allow(clippy::expect_used)]
static NETWORK_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(NETWORK_PATTERNS).expect("constant network patterns are valid")
});

/// Retries when stdout or stderr matches any pattern, or the exit status is
/// one of a configured set.
#[derive(Debug, Clone)]
pub struct PatternStrategy {
    name: String,
    patterns: RegexSet,
    exit_statuses: Vec<i32>,
    programs: Vec<String>,
    delay: Option<Duration>,
}

impl PatternStrategy {
    /// Compile a strategy. Fails on the first invalid pattern.
    pub fn new<I, S>(name: impl Into<String>, patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let patterns = RegexSet::new(patterns).map_err(|source| ConfigError::InvalidPattern {
            strategy: name.clone(),
            source,
        })?;
        Ok(Self {
            name,
            patterns,
            exit_statuses: Vec::new(),
            programs: Vec::new(),
            delay: None,
        })
    }

    /// Built-in strategy for network-facing tools.
    pub fn network() -> Self {
        Self {
            name: "network".to_string(),
            patterns: NETWORK_SET.clone(),
            exit_statuses: Vec::new(),
            programs: Vec::new(),
            delay: None,
        }
        .with_programs(NETWORK_PROGRAMS.iter().copied())
    }

    /// Exit statuses that trigger a retry regardless of output.
    pub fn with_exit_statuses(mut self, statuses: impl IntoIterator<Item = i32>) -> Self {
        self.exit_statuses.extend(statuses);
        self
    }

    /// Program basenames this strategy applies to under automatic selection.
    pub fn with_programs(mut self, programs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.programs.extend(programs.into_iter().map(Into::into));
        self
    }

    /// Fixed delay to use instead of exponential backoff.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn matches_output(&self, bytes: &[u8]) -> bool {
        !bytes.is_empty() && self.patterns.is_match(&String::from_utf8_lossy(bytes))
    }
}

impl Strategy for PatternStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn applies_to(&self, basename: &str) -> bool {
        let basename = basename.strip_suffix(".exe").unwrap_or(basename);
        self.programs.iter().any(|p| p == basename)
    }

    fn auto_programs(&self) -> Vec<String> {
        self.programs.clone()
    }

    fn decide(&self, report: &AttemptReport<'_>) -> Decision {
        let output = report.output;
        let hit = self.exit_statuses.contains(&output.exit_status)
            || self.matches_output(&output.stderr)
            || self.matches_output(&output.stdout);
        if hit {
            Decision::Retry { delay: self.delay }
        } else {
            Decision::GiveUp
        }
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
