// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Output drain grace after a child exits or is killed (default: 1000ms).
pub fn output_grace() -> Duration {
    parse_duration_ms("QA_OUTPUT_GRACE_MS").unwrap_or(Duration::from_secs(1))
}
