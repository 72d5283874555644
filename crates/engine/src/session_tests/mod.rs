// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session tests

mod lifecycle;
mod real_process;
mod retry;

use super::*;
use parking_lot::Mutex;
use qa_adapters::{FakeLauncher, FakeOutcome};
use qa_core::RetryPolicy;

/// Collects retry notifications for assertions.
#[derive(Clone, Default)]
struct RetryLog {
    events: Arc<Mutex<Vec<RetryEvent>>>,
}

impl RetryLog {
    fn callback(&self) -> impl Fn(&RetryEvent) + Send + Sync + 'static {
        let events = Arc::clone(&self.events);
        move |event| events.lock().push(event.clone())
    }

    fn events(&self) -> Vec<RetryEvent> {
        self.events.lock().clone()
    }

    fn delays(&self) -> Vec<Duration> {
        self.events().iter().map(|e| e.delay).collect()
    }
}

fn cmd(program: &str) -> CommandSpec {
    CommandSpec::new(program)
}

fn retry_with(policy: RetryPolicy) -> RunOptions {
    RunOptions::default().retry(policy)
}

fn session(
    command: CommandSpec,
    options: RunOptions,
    launcher: &FakeLauncher,
    log: &RetryLog,
) -> Session<FakeLauncher> {
    Session::builder(command, options)
        .on_retry(log.callback())
        .build(launcher.clone())
        .unwrap()
}

fn secs(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|s| Duration::from_secs(*s)).collect()
}
