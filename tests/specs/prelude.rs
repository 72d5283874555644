//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the qarun binary.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Returns the path to the qarun binary built for this test run.
fn qarun_binary() -> PathBuf {
    assert_cmd::cargo::cargo_bin("qarun")
}

/// Create a CLI builder for qarun commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
            envs: Vec::new(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(qarun_binary());
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        // Keep the developer's own configuration and log settings out of
        // the specs.
        cmd.env(
            "XDG_CONFIG_HOME",
            std::env::temp_dir().join("qarun-specs-no-config"),
        );
        cmd.env_remove("QARUN_CONFIG");
        cmd.env_remove("QARUN_LOG_FILE");
        cmd.env_remove("RUST_LOG");

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run and return the raw result
    pub fn runs(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        RunAssert { output }
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let run = self.runs();
        assert!(
            run.output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let run = self.runs();
        assert!(
            !run.output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).expect("stdout should be JSON")
    }

    /// Assert the process exit code.
    pub fn code(self, expected: i32) -> Self {
        assert_eq!(
            self.output.status.code(),
            Some(expected),
            "unexpected exit code\nstdout: {}\nstderr: {}",
            self.stdout(),
            self.stderr()
        );
        self
    }

    /// Assert stdout equals expected exactly.
    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Assert stderr does not contain substring.
    pub fn stderr_lacks(self, unexpected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            !stderr.contains(unexpected),
            "stderr should not contain '{}'\nstderr: {}",
            unexpected,
            stderr
        );
        self
    }
}

/// Scratch directory with helpers for config files and scripts.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// qarun builder running inside the project
    pub fn qarun(&self) -> CliBuilder {
        cli().pwd(self.path())
    }
}

/// Pids of live (non-zombie) processes whose argv is exactly `argv`.
#[cfg(target_os = "linux")]
pub fn live_processes(argv: &[&str]) -> Vec<String> {
    let mut wanted = Vec::new();
    for arg in argv {
        wanted.extend_from_slice(arg.as_bytes());
        wanted.push(0);
    }
    std::fs::read_dir("/proc")
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            std::fs::read(entry.path().join("cmdline")).is_ok_and(|cmdline| cmdline == wanted)
        })
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect()
}

/// Poll `check` every 20ms until it holds or `timeout` passes.
pub fn wait_for(timeout: std::time::Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = std::time::Instant::now() + timeout;
    loop {
        if check() {
            return true;
        }
        if std::time::Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(std::time::Duration::from_millis(20));
    }
}
