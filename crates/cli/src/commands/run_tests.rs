// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::Parser;

#[derive(Parser)]
struct Harness {
    #[command(flatten)]
    args: RunArgs,
}

fn parse(argv: &[&str]) -> RunArgs {
    let mut full = vec!["run"];
    full.extend_from_slice(argv);
    Harness::try_parse_from(full).unwrap().args
}

#[test]
fn flags_override_configured_defaults() {
    let args = parse(&[
        "--timeout",
        "30",
        "--retry",
        "network,timeout",
        "--max-retries",
        "2",
        "--backoff-base-ms",
        "250",
        "--fail-fatally",
        "--",
        "git",
        "fetch",
    ]);
    let defaults = RunOptions::default()
        .timeout(Duration::from_secs(600))
        .retry(true);

    let options = args.options(defaults);

    assert_eq!(options.timeout, Some(Duration::from_secs(30)));
    assert_eq!(
        options.retry,
        RetryPolicy::Named(vec!["network".into(), "timeout".into()])
    );
    assert_eq!(options.max_retries, 2);
    assert_eq!(options.backoff.base, Duration::from_millis(250));
    assert!(options.fail_fatally);
}

#[test]
fn absent_flags_keep_configured_defaults() {
    let args = parse(&["--", "make"]);
    let defaults = RunOptions::default()
        .timeout(Duration::from_secs(600))
        .retry(true)
        .max_retries(7)
        .fail_fatally(true);

    assert_eq!(args.options(defaults.clone()), defaults);
}

#[test]
fn command_spec_carries_args_and_env() {
    let args = parse(&["-e", "A=1", "--env", "B=x=y", "--", "/usr/bin/make", "-j4", "all"]);

    let spec = args.command_spec();

    assert_eq!(spec.program(), "/usr/bin/make");
    assert_eq!(spec.get_args(), ["-j4", "all"]);
    assert_eq!(spec.get_env().get("A").map(String::as_str), Some("1"));
    assert_eq!(spec.get_env().get("B").map(String::as_str), Some("x=y"));
}

#[test]
fn retry_policy_keywords_parse() {
    assert_eq!(parse(&["--retry", "false", "--", "x"]).retry, Some(RetryPolicy::Disabled));
    assert_eq!(parse(&["--retry", "auto", "--", "x"]).retry, Some(RetryPolicy::Auto));
}

#[yare::parameterized(
    failure = { 1, "qarun: make attempt 1 failed with status 1, retrying in 2s (always)" },
    timeout = { -1, "qarun: make attempt 1 timed out, retrying in 2s (always)" },
)]
fn retry_notice_describes_the_failure(status: i32, expected: &str) {
    let event = RetryEvent {
        strategy: "always".into(),
        attempt: 1,
        status,
        delay: Duration::from_secs(2),
    };
    assert_eq!(retry_notice("make", &event), expected);
}
