// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use qa_core::{PatternStrategy, StrategyRegistry};

#[tokio::test(start_paused = true)]
async fn disabled_runs_exactly_once() {
    let launcher = FakeLauncher::always(FakeOutcome::exit(1));
    let log = RetryLog::default();
    let mut s = session(cmd("git"), RunOptions::default(), &launcher, &log);

    let out = s.run().await.unwrap();

    assert_eq!(out.exit_status, 1);
    assert_eq!(launcher.call_count(), 1);
    assert_eq!(s.attempts(), 1);
    assert!(log.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn exhausted_ceiling_makes_six_attempts_with_doubling_delays() {
    let launcher = FakeLauncher::always(FakeOutcome::exit(1));
    let log = RetryLog::default();
    let mut s = session(
        cmd("make"),
        retry_with(RetryPolicy::named("always")),
        &launcher,
        &log,
    );

    let start = tokio::time::Instant::now();
    let out = s.run().await.unwrap();

    assert_eq!(out.exit_status, 1);
    assert_eq!(launcher.call_count(), 6);
    assert_eq!(s.retries(), 5);
    assert_eq!(log.delays(), secs(&[2, 4, 8, 16, 32]));
    assert_eq!(start.elapsed(), Duration::from_secs(62));

    let calls = launcher.calls();
    let gaps: Vec<Duration> = calls
        .windows(2)
        .map(|w| w[1].started_at - w[0].started_at)
        .collect();
    assert_eq!(gaps, secs(&[2, 4, 8, 16, 32]));
}

#[tokio::test(start_paused = true)]
async fn retry_events_carry_strategy_attempt_and_status() {
    let launcher = FakeLauncher::scripted([FakeOutcome::exit(7), FakeOutcome::exit(0)]);
    let log = RetryLog::default();
    let mut s = session(
        cmd("make"),
        retry_with(RetryPolicy::named("always")),
        &launcher,
        &log,
    );

    s.run().await.unwrap();

    assert_eq!(
        log.events(),
        [RetryEvent {
            strategy: "always".into(),
            attempt: 1,
            status: 7,
            delay: Duration::from_secs(2),
        }]
    );
}

async fn attempts_until_success(script: Vec<FakeOutcome>) -> usize {
    let launcher = FakeLauncher::scripted(script);
    let log = RetryLog::default();
    let mut s = session(
        cmd("make"),
        retry_with(RetryPolicy::named("always")),
        &launcher,
        &log,
    );
    let out = s.run().await.unwrap();
    assert!(out.success());
    launcher.call_count()
}

#[tokio::test(start_paused = true)]
async fn success_on_first_attempt_never_retries() {
    assert_eq!(attempts_until_success(vec![FakeOutcome::exit(0)]).await, 1);
}

#[tokio::test(start_paused = true)]
async fn success_stops_the_loop_early() {
    let script = vec![
        FakeOutcome::exit(1),
        FakeOutcome::exit(2),
        FakeOutcome::TimedOut,
        FakeOutcome::exit(0),
    ];
    assert_eq!(attempts_until_success(script).await, 4);
}

#[tokio::test(start_paused = true)]
async fn fails_twice_then_succeeds_with_last_output_only() {
    let launcher = FakeLauncher::scripted([
        FakeOutcome::output(1, "out-1", "err-1"),
        FakeOutcome::output(1, "out-2", "err-2"),
        FakeOutcome::output(0, "out-3", "err-3"),
    ]);
    let log = RetryLog::default();
    let mut s = session(
        cmd("make"),
        retry_with(RetryPolicy::named("always")),
        &launcher,
        &log,
    );

    let out = s.run().await.unwrap();

    assert_eq!(s.attempts(), 3);
    assert_eq!(s.retries(), 2);
    assert_eq!(out.exit_status, 0);
    assert_eq!(out.stdout_lossy(), "out-3");
    assert_eq!(out.stderr_lossy(), "err-3");
}

#[tokio::test]
async fn unknown_strategy_fails_before_any_launch() {
    let launcher = FakeLauncher::new();
    let result = Session::builder(cmd("git"), retry_with(RetryPolicy::named("bogus")))
        .build(launcher.clone());

    let err = result.err().unwrap();
    assert!(err.is_config());
    assert!(err.to_string().contains("bogus"), "got: {err}");
    assert_eq!(launcher.call_count(), 0);
}

#[tokio::test]
async fn one_unknown_name_poisons_the_list() {
    let launcher = FakeLauncher::new();
    let policy = RetryPolicy::Named(vec!["always".into(), "bogus".into()]);
    let result = Session::new(cmd("git"), retry_with(policy), launcher.clone());
    assert!(matches!(result, Err(RunError::Config(_))));
    assert_eq!(launcher.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn auto_with_no_matching_strategy_behaves_like_disabled() {
    let launcher = FakeLauncher::always(FakeOutcome::exit(1));
    let log = RetryLog::default();
    let mut s = session(
        cmd("/opt/bin/frobnicate"),
        retry_with(RetryPolicy::Auto),
        &launcher,
        &log,
    );

    assert!(s.strategy_names().is_empty());
    let out = s.run().await.unwrap();

    assert_eq!(out.exit_status, 1);
    assert_eq!(launcher.call_count(), 1);
    assert!(log.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn auto_picks_network_strategy_for_git() {
    let launcher = FakeLauncher::scripted([
        FakeOutcome::output(128, "", "fatal: The remote end hung up unexpectedly"),
        FakeOutcome::output(0, "done", ""),
    ]);
    let log = RetryLog::default();
    let mut s = session(
        cmd("/usr/bin/git").arg("fetch"),
        retry_with(RetryPolicy::Auto),
        &launcher,
        &log,
    );

    assert_eq!(s.strategy_names(), ["network"]);
    let out = s.run().await.unwrap();

    assert!(out.success());
    assert_eq!(log.events()[0].strategy, "network");
}

#[tokio::test(start_paused = true)]
async fn timeouts_count_toward_the_ceiling() {
    let launcher = FakeLauncher::always(FakeOutcome::TimedOut);
    let log = RetryLog::default();
    let options = retry_with(RetryPolicy::named("timeout")).timeout(Duration::from_secs(30));
    let mut s = session(cmd("make"), options, &launcher, &log);

    let out = s.run().await.unwrap();

    assert_eq!(out.exit_status, -1);
    assert_eq!(launcher.call_count(), 6);
    assert!(log.events().iter().all(|e| e.status == -1));
    assert!(launcher
        .calls()
        .iter()
        .all(|c| c.timeout == Some(Duration::from_secs(30))));
}

#[tokio::test(start_paused = true)]
async fn timeout_without_strategy_is_terminal() {
    let launcher = FakeLauncher::always(FakeOutcome::TimedOut);
    let log = RetryLog::default();
    let options = RunOptions::default().timeout(Duration::from_secs(1));
    let mut s = session(cmd("make"), options, &launcher, &log);

    let out = s.run().await.unwrap();

    assert!(out.is_timeout());
    assert_eq!(launcher.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn giving_up_ends_the_session() {
    let launcher = FakeLauncher::always(FakeOutcome::exit(2));
    let log = RetryLog::default();
    let mut s = session(
        cmd("make"),
        retry_with(RetryPolicy::named("timeout")),
        &launcher,
        &log,
    );

    let out = s.run().await.unwrap();

    assert_eq!(out.exit_status, 2);
    assert_eq!(launcher.call_count(), 1);
    assert!(log.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn first_willing_strategy_in_order_wins() {
    let launcher = FakeLauncher::scripted([FakeOutcome::exit(2), FakeOutcome::exit(0)]);
    let log = RetryLog::default();
    let policy = RetryPolicy::Named(vec!["timeout".into(), "always".into()]);
    let mut s = session(cmd("make"), retry_with(policy), &launcher, &log);

    s.run().await.unwrap();

    assert_eq!(log.events()[0].strategy, "always");
}

#[tokio::test(start_paused = true)]
async fn ceiling_is_configurable() {
    let launcher = FakeLauncher::always(FakeOutcome::exit(1));
    let log = RetryLog::default();
    let options = retry_with(RetryPolicy::named("always")).max_retries(2);
    let mut s = session(cmd("make"), options, &launcher, &log);

    s.run().await.unwrap();

    assert_eq!(launcher.call_count(), 3);
    assert_eq!(log.delays(), secs(&[2, 4]));
}

#[tokio::test(start_paused = true)]
async fn zero_ceiling_means_single_attempt() {
    let launcher = FakeLauncher::always(FakeOutcome::exit(1));
    let log = RetryLog::default();
    let options = retry_with(RetryPolicy::named("always")).max_retries(0);
    let mut s = session(cmd("make"), options, &launcher, &log);

    s.run().await.unwrap();

    assert_eq!(launcher.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn strategy_delay_overrides_backoff() {
    let registry = StrategyRegistry::builder()
        .register(
            PatternStrategy::new("slow", ["busy"])
                .unwrap()
                .with_delay(Duration::from_secs(10)),
        )
        .unwrap()
        .build();
    let launcher = FakeLauncher::scripted([
        FakeOutcome::output(1, "", "server busy"),
        FakeOutcome::output(1, "", "server busy"),
        FakeOutcome::exit(0),
    ]);
    let log = RetryLog::default();
    let mut s = Session::builder(cmd("deploy"), retry_with(RetryPolicy::named("slow")))
        .registry(&registry)
        .on_retry(log.callback())
        .build(launcher.clone())
        .unwrap();

    let start = tokio::time::Instant::now();
    s.run().await.unwrap();

    assert_eq!(log.delays(), secs(&[10, 10]));
    assert_eq!(start.elapsed(), Duration::from_secs(20));
}

#[tokio::test(start_paused = true)]
async fn custom_backoff_base() {
    let launcher = FakeLauncher::scripted([
        FakeOutcome::exit(1),
        FakeOutcome::exit(1),
        FakeOutcome::exit(0),
    ]);
    let log = RetryLog::default();
    let options = retry_with(RetryPolicy::named("always"))
        .backoff(qa_core::Backoff::with_base(Duration::from_millis(100)));
    let mut s = session(cmd("make"), options, &launcher, &log);

    s.run().await.unwrap();

    assert_eq!(
        log.delays(),
        [Duration::from_millis(200), Duration::from_millis(400)]
    );
}
