// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry policy requested by a caller

use crate::ConfigError;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Which strategies a reliable run may consult after a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Exactly one attempt.
    #[default]
    Disabled,
    /// Pick every registered strategy that applies to the program's basename.
    Auto,
    /// Consult these strategies, in order.
    Named(Vec<String>),
}

impl RetryPolicy {
    /// Policy naming a single strategy.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(vec![name.into()])
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl From<bool> for RetryPolicy {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Auto
        } else {
            Self::Disabled
        }
    }
}

impl FromStr for RetryPolicy {
    type Err = ConfigError;

    /// `false`/`off`/`none` disable retries, `true`/`auto` select
    /// automatically, anything else is a comma-separated list of names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "false" | "off" | "none" => Ok(Self::Disabled),
            "true" | "auto" => Ok(Self::Auto),
            list => {
                let names: Vec<String> = list.split(',').map(|n| n.trim().to_string()).collect();
                if names.iter().any(String::is_empty) {
                    return Err(ConfigError::InvalidOption(format!(
                        "retry policy has an empty strategy name: {:?}",
                        s
                    )));
                }
                Ok(Self::Named(names))
            }
        }
    }
}

impl<'de> Deserialize<'de> for RetryPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            One(String),
            Many(Vec<String>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(enabled) => Ok(enabled.into()),
            Raw::One(s) => s.parse().map_err(serde::de::Error::custom),
            Raw::Many(names) if names.is_empty() => Ok(Self::Disabled),
            Raw::Many(names) => Ok(Self::Named(names)),
        }
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
