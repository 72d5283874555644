// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::Result;
use clap::ValueEnum;
use qa_core::CommandOutput;
use serde::Serialize;
use std::io::Write;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

/// Exit code reported when the final attempt hit its timeout, matching
/// coreutils `timeout`.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// JSON shape of a finished run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub exit_status: i32,
    pub timed_out: bool,
    pub stdout: String,
    pub stderr: String,
    pub attempts: u32,
}

impl RunReport {
    pub fn new(output: &CommandOutput, attempts: u32) -> Self {
        Self {
            exit_status: output.exit_status,
            timed_out: output.is_timeout(),
            stdout: output.stdout_lossy().into_owned(),
            stderr: output.stderr_lossy().into_owned(),
            attempts,
        }
    }
}

/// Process exit code that represents `output` to a shell.
pub fn exit_code(output: &CommandOutput) -> i32 {
    if output.is_timeout() {
        TIMEOUT_EXIT_CODE
    } else if (0..=255).contains(&output.exit_status) {
        output.exit_status
    } else {
        1
    }
}

/// Replay the child's streams onto our own.
pub fn replay(output: &CommandOutput, out: &mut impl Write, err: &mut impl Write) -> Result<()> {
    out.write_all(&output.stdout)?;
    out.flush()?;
    err.write_all(&output.stderr)?;
    err.flush()?;
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
