//! `qarun run` output and exit status specs

use crate::prelude::*;

#[test]
fn replays_child_stdout_and_stderr() {
    cli()
        .args(&["run", "--", "sh", "-c", "echo out; echo err >&2"])
        .passes()
        .stdout_eq("out\n")
        .stderr_has("err\n");
}

#[test]
fn passes_child_exit_status_through() {
    cli()
        .args(&["run", "--", "sh", "-c", "exit 7"])
        .fails()
        .code(7)
        .stderr_lacks("Error:");
}

#[test]
fn timeout_exits_124() {
    cli()
        .args(&["run", "--timeout", "1", "--", "sleep", "30"])
        .fails()
        .code(124);
}

#[test]
fn json_output_reports_result() {
    let run = cli()
        .args(&["-o", "json", "run", "--", "sh", "-c", "printf hi; exit 3"])
        .fails()
        .code(3);
    let value = run.json();

    assert_eq!(value["exit_status"], 3);
    assert_eq!(value["stdout"], "hi");
    assert_eq!(value["attempts"], 1);
    assert_eq!(value["timed_out"], false);
}

#[test]
fn cwd_and_env_reach_the_child() {
    let project = Project::empty();
    std::fs::create_dir_all(project.path().join("sub")).unwrap();

    cli()
        .args(&[
            "run",
            "--cwd",
            project.path().join("sub").to_str().unwrap(),
            "-e",
            "GREETING=hello",
            "--",
            "sh",
            "-c",
            "basename \"$(pwd)\"; echo $GREETING",
        ])
        .passes()
        .stdout_eq("sub\nhello\n");
}

#[test]
fn fail_fatally_reports_the_command() {
    cli()
        .args(&["run", "--fail-fatally", "--", "sh", "-c", "exit 4"])
        .fails()
        .code(1)
        .stderr_has("command failed with exit status 4");
}

#[test]
fn log_file_receives_diagnostics() {
    let project = Project::empty();
    let log = project.path().join("logs/qarun.log");

    cli()
        .args(&["run", "--", "true"])
        .env("RUST_LOG", "info")
        .env("QARUN_LOG_FILE", &log)
        .passes();

    let text = std::fs::read_to_string(&log).unwrap();
    assert!(text.contains("exited"), "log: {text}");
}

#[cfg(target_os = "linux")]
#[test]
fn interrupt_exits_130_and_kills_the_attempt() {
    use std::process::Stdio;
    use std::time::Duration;

    let mut cmd = cli()
        .args(&["run", "--", "sh", "-c", "sleep 46; echo done"])
        .command();
    cmd.stdout(Stdio::null()).stderr(Stdio::null());
    let mut qarun = cmd.spawn().unwrap();

    let started = wait_for(Duration::from_secs(10), || {
        !live_processes(&["sleep", "46"]).is_empty()
    });
    assert!(started, "attempt never started");

    let sent = std::process::Command::new("kill")
        .args(["-INT", &qarun.id().to_string()])
        .status()
        .unwrap();
    assert!(sent.success());

    assert_eq!(qarun.wait().unwrap().code(), Some(130));
    let cleaned = wait_for(Duration::from_secs(2), || {
        live_processes(&["sleep", "46"]).is_empty()
    });
    assert!(cleaned, "sleep 46 survived the interrupt");
}
