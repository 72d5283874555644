// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

#[tokio::test(start_paused = true)]
async fn rerun_returns_cached_result_without_launching() {
    let launcher = FakeLauncher::scripted([FakeOutcome::exit(1), FakeOutcome::output(0, "ok", "")]);
    let log = RetryLog::default();
    let mut s = session(
        cmd("make"),
        retry_with(RetryPolicy::named("always")),
        &launcher,
        &log,
    );

    let first = s.run().await.unwrap();
    let second = s.run().await.unwrap();

    assert!(s.is_done());
    assert_eq!(first, second);
    assert_eq!(launcher.call_count(), 2);
    assert_eq!(log.events().len(), 1);
}

#[tokio::test]
async fn fail_fatally_turns_final_failure_into_error() {
    let launcher = FakeLauncher::always(FakeOutcome::exit(3));
    let log = RetryLog::default();
    let options = RunOptions::default().fail_fatally(true);
    let mut s = session(cmd("make").arg("install"), options, &launcher, &log);

    let err = s.run().await.unwrap_err();
    match &err {
        RunError::CommandFailed { command, status } => {
            assert_eq!(command, "make install");
            assert_eq!(*status, 3);
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }

    let again = s.run().await.unwrap_err();
    assert_eq!(again.to_string(), err.to_string());
    assert_eq!(launcher.call_count(), 1);
}

#[tokio::test]
async fn fail_fatally_passes_success_through() {
    let launcher = FakeLauncher::new();
    let log = RetryLog::default();
    let options = RunOptions::default().fail_fatally(true);
    let mut s = session(cmd("true"), options, &launcher, &log);

    assert!(s.run().await.unwrap().success());
}

#[tokio::test(start_paused = true)]
async fn fail_fatally_applies_after_retries_are_exhausted() {
    let launcher = FakeLauncher::always(FakeOutcome::exit(1));
    let log = RetryLog::default();
    let options = retry_with(RetryPolicy::named("always"))
        .max_retries(1)
        .fail_fatally(true);
    let mut s = session(cmd("make"), options, &launcher, &log);

    assert!(matches!(
        s.run().await,
        Err(RunError::CommandFailed { status: 1, .. })
    ));
    assert_eq!(launcher.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn spawn_failure_is_terminal_and_not_retried() {
    let launcher = FakeLauncher::always(FakeOutcome::SpawnError("no such file".into()));
    let log = RetryLog::default();
    let mut s = session(
        cmd("missing-tool"),
        retry_with(RetryPolicy::named("always")),
        &launcher,
        &log,
    );

    let err = s.run().await.unwrap_err();
    assert!(matches!(err, RunError::Launch(_)), "got {err:?}");
    assert!(err.to_string().contains("missing-tool"));
    assert_eq!(launcher.call_count(), 1);
    assert!(log.events().is_empty());

    let again = s.run().await.unwrap_err();
    assert!(matches!(again, RunError::Launch(_)), "got {again:?}");
    assert_eq!(again.to_string(), err.to_string());
    assert_eq!(launcher.call_count(), 1);
}

#[tokio::test]
async fn invalid_options_are_rejected_at_build() {
    let launcher = FakeLauncher::new();
    let options = RunOptions::default().timeout(Duration::ZERO);
    let result = Session::new(cmd("make"), options, launcher.clone());

    assert!(matches!(result, Err(RunError::Config(_))));
    assert_eq!(launcher.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn before_attempt_hook_runs_for_every_attempt() {
    let launcher = FakeLauncher::scripted([
        FakeOutcome::exit(1),
        FakeOutcome::exit(1),
        FakeOutcome::exit(0),
    ]);
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let mut s = Session::builder(cmd("make"), retry_with(RetryPolicy::named("always")))
        .before_attempt(move |_cmd: &mut Command| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .build(launcher.clone())
        .unwrap();

    s.run().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn options_cwd_overrides_command_cwd() {
    let launcher = FakeLauncher::new();
    let log = RetryLog::default();
    let command = cmd("ls").cwd("/from/command");

    let mut s = session(command.clone(), RunOptions::default(), &launcher, &log);
    s.run().await.unwrap();

    let options = RunOptions::default().cwd("/from/options");
    let mut s = session(command, options, &launcher, &log);
    s.run().await.unwrap();

    let cwds: Vec<Option<PathBuf>> = launcher.calls().into_iter().map(|c| c.cwd).collect();
    assert_eq!(
        cwds,
        [
            Some(PathBuf::from("/from/command")),
            Some(PathBuf::from("/from/options"))
        ]
    );
}

#[tokio::test]
async fn arguments_reach_the_launcher_unchanged() {
    let launcher = FakeLauncher::new();
    let command = cmd("git").args(["clone", "--depth", "1", "https://example.com/r.git"]);

    run_command(command, RunOptions::default(), launcher.clone())
        .await
        .unwrap();

    let call = &launcher.calls()[0];
    assert_eq!(call.program, "git");
    assert_eq!(
        call.args,
        ["clone", "--depth", "1", "https://example.com/r.git"]
    );
}

#[tokio::test(start_paused = true)]
async fn set_retry_callback_replaces_previous_callback() {
    let launcher = FakeLauncher::scripted([FakeOutcome::exit(1), FakeOutcome::exit(0)]);
    let first = RetryLog::default();
    let second = RetryLog::default();
    let mut s = session(
        cmd("make"),
        retry_with(RetryPolicy::named("always")),
        &launcher,
        &first,
    );
    s.set_retry_callback(second.callback());

    s.run().await.unwrap();

    assert!(first.events().is_empty());
    assert_eq!(second.events().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn spawned_session_resolves_through_wait() {
    let launcher = FakeLauncher::scripted([FakeOutcome::exit(1), FakeOutcome::output(0, "hi", "")]);
    let s = Session::new(
        cmd("make"),
        retry_with(RetryPolicy::named("always")),
        launcher.clone(),
    )
    .unwrap();

    let out = s.spawn().wait().await.unwrap();

    assert_eq!(out.stdout_lossy(), "hi");
    assert_eq!(launcher.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn on_complete_delivers_result_once() {
    let launcher = FakeLauncher::always(FakeOutcome::exit(4));
    let s = Session::new(cmd("make"), RunOptions::default(), launcher).unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel();

    let done = s.spawn().on_complete(move |result| {
        let _ = tx.send(result.map(|o| o.exit_status));
    });

    assert_eq!(rx.await.unwrap().unwrap(), 4);
    done.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn cancelled_session_reports_aborted() {
    let launcher = FakeLauncher::always(FakeOutcome::exit(1));
    let s = Session::new(
        cmd("make"),
        retry_with(RetryPolicy::named("always")),
        launcher,
    )
    .unwrap();

    let pending = s.spawn();
    pending.cancel();

    assert!(matches!(pending.wait().await, Err(RunError::Aborted(_))));
}

#[tokio::test(start_paused = true)]
async fn sessions_run_concurrently_on_one_runtime() {
    let slow = FakeLauncher::scripted([FakeOutcome::exit(1), FakeOutcome::exit(0)]);
    let fast = FakeLauncher::new();
    let options = retry_with(RetryPolicy::named("always"));

    let a = Session::new(cmd("slow"), options.clone(), slow.clone())
        .unwrap()
        .spawn();
    let b = Session::new(cmd("fast"), options, fast.clone())
        .unwrap()
        .spawn();

    let fast_out = b.wait().await.unwrap();
    assert!(fast_out.success());
    assert_eq!(fast.call_count(), 1);

    assert!(a.wait().await.unwrap().success());
    assert_eq!(slow.call_count(), 2);
}
