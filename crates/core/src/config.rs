// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run options and the TOML configuration file.

use crate::{Backoff, ConfigError, PatternStrategy, RetryPolicy, StrategyRegistry};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default ceiling on retries per session.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Options for one reliable run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Wall-clock limit per attempt. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Working directory for the child; overrides the command's own.
    pub cwd: Option<PathBuf>,
    pub retry: RetryPolicy,
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    pub backoff: Backoff,
    /// Report a non-zero terminal status as an error instead of a result.
    pub fail_fatally: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            cwd: None,
            retry: RetryPolicy::Disabled,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Backoff::default(),
            fail_fatally: false,
        }
    }
}

impl RunOptions {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn retry(mut self, policy: impl Into<RetryPolicy>) -> Self {
        self.retry = policy.into();
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn fail_fatally(mut self, enabled: bool) -> Self {
        self.fail_fatally = enabled;
        self
    }

    /// Reject option combinations that cannot describe a sensible run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidOption(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.backoff.base.is_zero() {
            return Err(ConfigError::InvalidOption(
                "backoff base must be greater than zero".to_string(),
            ));
        }
        if self.backoff.max < self.backoff.base {
            return Err(ConfigError::InvalidOption(format!(
                "backoff max ({:?}) is smaller than its base ({:?})",
                self.backoff.max, self.backoff.base
            )));
        }
        Ok(())
    }
}

/// Parsed contents of a `qarun` configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QaConfig {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default, rename = "strategy")]
    pub strategies: Vec<StrategyDef>,
}

/// `[defaults]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub timeout_secs: Option<u64>,
    pub retry: Option<RetryPolicy>,
    pub max_retries: Option<u32>,
    pub backoff_base_ms: Option<u64>,
    pub fail_fatally: Option<bool>,
}

/// One `[[strategy]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyDef {
    pub name: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub exit_statuses: Vec<i32>,
    #[serde(default)]
    pub programs: Vec<String>,
    pub delay_secs: Option<u64>,
}

impl QaConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if it exists, otherwise return the empty configuration.
    pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Built-in strategies followed by the configured ones.
    pub fn registry(&self) -> Result<StrategyRegistry, ConfigError> {
        let mut builder = StrategyRegistry::builder().with_builtins();
        for def in &self.strategies {
            let mut strategy = PatternStrategy::new(&def.name, &def.patterns)?
                .with_exit_statuses(def.exit_statuses.iter().copied())
                .with_programs(def.programs.iter().cloned());
            if let Some(secs) = def.delay_secs {
                strategy = strategy.with_delay(Duration::from_secs(secs));
            }
            builder = builder.register(strategy)?;
        }
        Ok(builder.build())
    }

    /// Validated run options from the `[defaults]` table.
    pub fn run_options(&self) -> Result<RunOptions, ConfigError> {
        let d = &self.defaults;
        let mut backoff = Backoff::default();
        if let Some(ms) = d.backoff_base_ms {
            backoff.base = Duration::from_millis(ms);
        }
        let opts = RunOptions {
            timeout: d.timeout_secs.map(Duration::from_secs),
            cwd: None,
            retry: d.retry.clone().unwrap_or_default(),
            max_retries: d.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            backoff,
            fail_fatally: d.fail_fatally.unwrap_or(false),
        };
        opts.validate()?;
        Ok(opts)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
