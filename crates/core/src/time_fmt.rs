// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable durations for retry notices and logs.

use std::time::Duration;

/// Format a delay as `"250ms"`, `"2s"`, `"1m4s"`, `"1h"` or `"1h2m"`.
///
/// Sub-second delays keep millisecond precision; longer ones drop it.
pub fn format_delay(delay: Duration) -> String {
    let secs = delay.as_secs();
    if secs == 0 {
        return format!("{}ms", delay.as_millis());
    }
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    match (h, m, s) {
        (0, 0, s) => format!("{}s", s),
        (0, m, 0) => format!("{}m", m),
        (0, m, s) => format!("{}m{}s", m, s),
        (h, 0, _) => format!("{}h", h),
        (h, m, _) => format!("{}h{}m", h, m),
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
