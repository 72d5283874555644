// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn request_defaults_to_command_cwd() {
    let cmd = CommandSpec::new("make").cwd("/src/tree");
    let request = LaunchRequest::new(&cmd);
    assert_eq!(request.cwd, Some(Path::new("/src/tree")));
    assert_eq!(request.timeout, None);
    assert!(request.prepare.is_none());
}

#[test]
fn build_command_sets_program_args_and_dir() {
    let cmd = CommandSpec::new("git").args(["fetch", "origin"]);
    let request = LaunchRequest {
        cwd: Some(Path::new("/work")),
        ..LaunchRequest::new(&cmd)
    };
    let built = build_command(&request);
    let std_cmd = built.as_std();
    assert_eq!(std_cmd.get_program(), "git");
    assert_eq!(std_cmd.get_args().collect::<Vec<_>>(), ["fetch", "origin"]);
    assert_eq!(std_cmd.get_current_dir(), Some(Path::new("/work")));
}

#[test]
fn build_command_runs_hook_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let hook: PrepareHook = Arc::new(move |_cmd: &mut Command| -> Result<(), HookError> {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let cmd = CommandSpec::new("true");
    let request = LaunchRequest {
        prepare: Some(&hook),
        ..LaunchRequest::new(&cmd)
    };
    build_command(&request);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn cloned_launch_error_keeps_kind_and_message() {
    let err = LaunchError::Spawn {
        program: "missing-tool".into(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    };
    let copy = err.clone();
    assert_eq!(copy.to_string(), err.to_string());
    match copy {
        LaunchError::Spawn { program, source } => {
            assert_eq!(program, "missing-tool");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Spawn, got {other:?}"),
    }
}
