// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locate and load the configuration file.

use qa_core::{ConfigError, QaConfig};
use std::path::Path;

/// Load configuration with precedence `--config` > `QARUN_CONFIG` > default
/// location.
///
/// An explicitly named file must exist; the default one is optional.
pub fn load(explicit: Option<&Path>) -> Result<QaConfig, ConfigError> {
    if let Some(path) = explicit {
        return QaConfig::load(path);
    }
    if let Some(path) = crate::env::config_path() {
        return QaConfig::load(&path);
    }
    match crate::env::default_config_path() {
        Some(path) => QaConfig::load_optional(&path),
        None => Ok(QaConfig::default()),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
