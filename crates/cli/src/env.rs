// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

// --- Configuration ---

/// Explicit configuration file from `QARUN_CONFIG`.
pub fn config_path() -> Option<PathBuf> {
    non_empty("QARUN_CONFIG").map(PathBuf::from)
}

/// Resolve the default config file: <config dir>/qarun/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("qarun").join("config.toml"))
}

// --- Logging ---

pub fn log_file() -> Option<PathBuf> {
    non_empty("QARUN_LOG_FILE").map(PathBuf::from)
}
