// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Construction-time errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a registry, loading configuration, or
/// resolving a retry policy. None of these are ever retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown retry strategy: {name}")]
    UnknownStrategy { name: String },
    #[error("retry strategy registered twice: {0}")]
    DuplicateStrategy(String),
    #[error("invalid pattern in strategy {strategy}: {source}")]
    InvalidPattern {
        strategy: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("strategy registry is already initialized")]
    RegistryInitialized,
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
