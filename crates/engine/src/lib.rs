// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Reliable command execution engine

mod error;
mod pending;
mod session;

pub use error::RunError;
pub use pending::PendingRun;
pub use session::{run_command, RetryCallback, RetryEvent, Session, SessionBuilder};
