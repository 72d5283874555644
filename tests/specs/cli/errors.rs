//! CLI error handling specs

use crate::prelude::*;

#[test]
fn unknown_strategy_is_a_config_error() {
    let project = Project::empty();

    project
        .qarun()
        .args(&["run", "--retry", "bogus", "--", "sh", "-c", "echo ran > marker"])
        .fails()
        .code(2)
        .stderr_has("unknown retry strategy: bogus");

    assert!(!project.path().join("marker").exists());
}

#[test]
fn missing_binary_reports_spawn_failure() {
    cli()
        .args(&["run", "--", "qarun-no-such-program"])
        .fails()
        .code(1)
        .stderr_has("failed to spawn qarun-no-such-program");
}

#[test]
fn explicit_missing_config_is_an_error() {
    let project = Project::empty();

    project
        .qarun()
        .args(&["--config", "nope.toml", "strategies"])
        .fails()
        .code(2)
        .stderr_has("nope.toml");
}

#[test]
fn unknown_config_key_is_rejected() {
    let project = Project::empty();
    let config = project.file("qarun.toml", "[defaults]\nretries = 3\n");

    project
        .qarun()
        .args(&["strategies"])
        .env("QARUN_CONFIG", &config)
        .fails()
        .code(2);
}

#[test]
fn zero_timeout_is_rejected() {
    cli()
        .args(&["run", "--timeout", "0", "--", "true"])
        .fails()
        .code(2)
        .stderr_has("timeout must be greater than zero");
}
