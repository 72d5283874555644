// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `qarun strategies` - List registered retry strategies

use std::io::Write;

use anyhow::Result;
use qa_core::{QaConfig, StrategyRegistry};
use serde::Serialize;

use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};
use crate::table::{Column, Table};

#[derive(Debug, Serialize)]
pub struct StrategyEntry {
    pub name: String,
    /// Programs for which `--retry auto` selects this strategy.
    pub auto_programs: Vec<String>,
}

pub fn entries(registry: &StrategyRegistry) -> Vec<StrategyEntry> {
    registry
        .iter()
        .map(|s| StrategyEntry {
            name: s.name().to_string(),
            auto_programs: s.auto_programs(),
        })
        .collect()
}

pub fn render(entries: &[StrategyEntry], format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => output::print_json(&entries, out)?,
        OutputFormat::Text => {
            let mut table = Table::new(vec![Column::new("NAME"), Column::new("AUTO").with_max(60)]);
            for entry in entries {
                let auto = if entry.auto_programs.is_empty() {
                    "-".to_string()
                } else {
                    entry.auto_programs.join(", ")
                };
                table.row(vec![entry.name.clone(), auto]);
            }
            table.render(out)?;
        }
    }
    Ok(())
}

pub fn handle(config: &QaConfig, format: OutputFormat) -> Result<()> {
    let registry = config.registry().map_err(ExitError::config)?;
    render(&entries(&registry), format, &mut std::io::stdout())
}

#[cfg(test)]
#[path = "strategies_tests.rs"]
mod tests;
