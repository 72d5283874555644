//! Retry behavior through the CLI

use crate::prelude::*;

const FLAKY: &str =
    r#"n=$(cat count 2>/dev/null || echo 0); n=$((n+1)); echo $n > count; echo "try $n"; [ "$n" -ge 3 ]"#;

#[test]
fn retries_until_success_and_keeps_last_output() {
    let project = Project::empty();

    let run = project
        .qarun()
        .args(&[
            "-o",
            "json",
            "run",
            "--retry",
            "always",
            "--backoff-base-ms",
            "10",
            "--",
            "sh",
            "-c",
            FLAKY,
        ])
        .passes()
        .stderr_has("retrying in 20ms (always)")
        .stderr_has("retrying in 40ms (always)");
    let value = run.json();

    assert_eq!(value["attempts"], 3);
    assert_eq!(value["stdout"], "try 3\n");
}

#[test]
fn retry_ceiling_is_honored() {
    let project = Project::empty();

    let run = project
        .qarun()
        .args(&[
            "-o",
            "json",
            "run",
            "--retry",
            "always",
            "--max-retries",
            "1",
            "--backoff-base-ms",
            "10",
            "--",
            "sh",
            "-c",
            FLAKY,
        ])
        .fails()
        .code(1);

    assert_eq!(run.json()["attempts"], 2);
}

#[test]
fn auto_without_matching_strategy_runs_once() {
    let project = Project::empty();

    project
        .qarun()
        .args(&["run", "--retry", "auto", "--", "sh", "-c", FLAKY])
        .fails()
        .stderr_lacks("retrying");

    assert_eq!(
        std::fs::read_to_string(project.path().join("count")).unwrap(),
        "1\n"
    );
}

#[test]
fn configured_strategy_is_available_by_name() {
    let project = Project::empty();
    let config = project.file(
        "qarun.toml",
        r#"
[defaults]
backoff_base_ms = 10

[[strategy]]
name = "try-again"
patterns = ["try [12]"]
"#,
    );

    project
        .qarun()
        .args(&["run", "--retry", "try-again", "--", "sh", "-c", FLAKY])
        .env("QARUN_CONFIG", &config)
        .passes()
        .stdout_eq("try 3\n");
}
