// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn named(names: &[&str]) -> RetryPolicy {
    RetryPolicy::Named(names.iter().map(|n| n.to_string()).collect())
}

#[yare::parameterized(
    off       = { "off",              RetryPolicy::Disabled },
    none      = { "none",             RetryPolicy::Disabled },
    no        = { "false",            RetryPolicy::Disabled },
    auto      = { "auto",             RetryPolicy::Auto },
    yes       = { "true",             RetryPolicy::Auto },
    single    = { "network",          named(&["network"]) },
    list      = { "network, timeout", named(&["network", "timeout"]) },
)]
fn parse(input: &str, expected: RetryPolicy) {
    assert_eq!(input.parse::<RetryPolicy>().unwrap(), expected);
}

#[test]
fn parse_rejects_empty_names() {
    let err = "network,,timeout".parse::<RetryPolicy>().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOption(_)), "got: {err}");
}

#[test]
fn bool_conversion() {
    assert_eq!(RetryPolicy::from(true), RetryPolicy::Auto);
    assert_eq!(RetryPolicy::from(false), RetryPolicy::Disabled);
    assert!(RetryPolicy::default().is_disabled());
}

#[derive(Debug, serde::Deserialize)]
struct Holder {
    retry: RetryPolicy,
}

#[yare::parameterized(
    flag_true  = { "retry = true",                    RetryPolicy::Auto },
    flag_false = { "retry = false",                   RetryPolicy::Disabled },
    string     = { r#"retry = "always""#,             named(&["always"]) },
    array      = { r#"retry = ["network", "always"]"#, named(&["network", "always"]) },
    empty      = { "retry = []",                      RetryPolicy::Disabled },
)]
fn deserialize(toml_src: &str, expected: RetryPolicy) {
    let holder: Holder = toml::from_str(toml_src).unwrap();
    assert_eq!(holder.retry, expected);
}
