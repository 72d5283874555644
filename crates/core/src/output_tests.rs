// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn timeout_sentinel_is_negative_and_failing() {
    let out = CommandOutput::timed_out(Vec::new(), b"partial".to_vec());
    assert_eq!(out.exit_status, -1);
    assert!(out.is_timeout());
    assert!(!out.success());
    assert_eq!(out.stderr_lossy(), "partial");
}

#[test]
fn zero_is_success() {
    let out = CommandOutput::new(0, "hello\n", "");
    assert!(out.success());
    assert!(!out.is_timeout());
    assert_eq!(out.stdout_lossy(), "hello\n");
}

#[cfg(unix)]
#[test]
fn signal_death_maps_above_128() {
    use std::os::unix::process::ExitStatusExt;
    // Raw wait status for "killed by SIGKILL".
    let status = std::process::ExitStatus::from_raw(9);
    let out = CommandOutput::from_process(status, Vec::new(), Vec::new());
    assert_eq!(out.exit_status, 137);
}

#[cfg(unix)]
#[test]
fn exit_code_passes_through() {
    use std::os::unix::process::ExitStatusExt;
    // Raw wait status for "exited with code 3".
    let status = std::process::ExitStatus::from_raw(3 << 8);
    let out = CommandOutput::from_process(status, Vec::new(), Vec::new());
    assert_eq!(out.exit_status, 3);
}
