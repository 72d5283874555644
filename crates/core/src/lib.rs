// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! qa-core: data model and retry-strategy registry for reliable command execution

pub mod backoff;
pub mod command;
pub mod config;
mod error;
pub mod output;
pub mod policy;
pub mod registry;
pub mod strategy;
pub mod time_fmt;

pub use backoff::Backoff;
pub use command::{program_basename, CommandSpec};
pub use config::{QaConfig, RunOptions};
pub use error::ConfigError;
pub use output::{CommandOutput, TIMEOUT_STATUS};
pub use policy::RetryPolicy;
pub use registry::{RegistryBuilder, StrategyRegistry};
pub use strategy::{
    AlwaysRetry, AttemptReport, Decision, PatternStrategy, Strategy, TimeoutRetry,
};
pub use time_fmt::format_delay;
