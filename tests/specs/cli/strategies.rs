//! `qarun strategies` listing specs

use crate::prelude::*;

#[test]
fn lists_builtin_strategies() {
    cli()
        .args(&["strategies"])
        .passes()
        .stdout_has("NAME")
        .stdout_has("network")
        .stdout_has("timeout")
        .stdout_has("always");
}

#[test]
fn json_includes_configured_strategy() {
    let project = Project::empty();
    let config = project.file(
        "qarun.toml",
        "[[strategy]]\nname = \"flaky\"\npatterns = [\"EAGAIN\"]\nprograms = [\"make\"]\n",
    );

    let run = project
        .qarun()
        .args(&["--config", config.to_str().unwrap(), "-o", "json", "strategies"])
        .passes();
    let value = run.json();
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();

    assert_eq!(names, ["network", "timeout", "always", "flaky"]);
}
