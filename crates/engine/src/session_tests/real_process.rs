// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sessions driving real child processes.

use super::*;
use qa_adapters::TokioLauncher;
use qa_core::Backoff;

fn fast_retry(policy: RetryPolicy) -> RunOptions {
    retry_with(policy).backoff(Backoff::with_base(Duration::from_millis(10)))
}

fn launcher() -> TokioLauncher {
    TokioLauncher::new().output_grace(Duration::from_millis(200))
}

#[tokio::test]
async fn flaky_script_succeeds_on_third_attempt() {
    let dir = tempfile::tempdir().unwrap();
    // Each run bumps a counter file and fails until the third run.
    let script = r#"n=$(cat count 2>/dev/null || echo 0); n=$((n+1)); echo $n > count; echo "attempt $n"; [ "$n" -ge 3 ]"#;
    let command = CommandSpec::new("sh").args(["-c", script]).cwd(dir.path());
    let log = RetryLog::default();

    let mut s = Session::builder(command, fast_retry(RetryPolicy::named("always")))
        .on_retry(log.callback())
        .build(launcher())
        .unwrap();
    let out = s.run().await.unwrap();

    assert_eq!(out.exit_status, 0);
    assert_eq!(out.stdout_lossy(), "attempt 3\n");
    assert_eq!(s.attempts(), 3);
    assert_eq!(
        log.delays(),
        [Duration::from_millis(20), Duration::from_millis(40)]
    );
}

#[tokio::test]
async fn hung_process_is_killed_and_retried_on_timeout() {
    let options = fast_retry(RetryPolicy::named("timeout"))
        .timeout(Duration::from_millis(200))
        .max_retries(1);
    let log = RetryLog::default();
    let mut s = Session::builder(CommandSpec::new("sleep").arg("30"), options)
        .on_retry(log.callback())
        .build(launcher())
        .unwrap();

    let started = std::time::Instant::now();
    let out = s.run().await.unwrap();

    assert!(out.is_timeout());
    assert_eq!(s.attempts(), 2);
    assert_eq!(log.events().len(), 1);
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn missing_binary_is_a_launch_error() {
    let result = run_command(
        CommandSpec::new("qa-definitely-not-installed"),
        retry_with(RetryPolicy::named("always")),
        launcher(),
    )
    .await;

    assert!(matches!(result, Err(RunError::Launch(_))));
}

#[tokio::test]
async fn concurrent_sessions_do_not_block_each_other() {
    let slow = Session::new(
        CommandSpec::new("sh").args(["-c", "sleep 1; echo slow"]),
        RunOptions::default(),
        launcher(),
    )
    .unwrap()
    .spawn();
    let fast = Session::new(
        CommandSpec::new("sh").args(["-c", "echo fast"]),
        RunOptions::default(),
        launcher(),
    )
    .unwrap()
    .spawn();

    let started = std::time::Instant::now();
    let fast_out = fast.wait().await.unwrap();
    let fast_elapsed = started.elapsed();
    let slow_out = slow.wait().await.unwrap();

    assert_eq!(fast_out.stdout_lossy(), "fast\n");
    assert_eq!(slow_out.stdout_lossy(), "slow\n");
    assert!(fast_elapsed < Duration::from_millis(900), "{fast_elapsed:?}");
}
