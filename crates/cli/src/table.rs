// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain table renderer for CLI list views.

use std::io::Write;

/// A column definition in a [`Table`].
pub struct Column {
    pub name: &'static str,
    /// Maximum width (`None` = unlimited). Longer values are truncated.
    pub max_width: Option<usize>,
}

impl Column {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            max_width: None,
        }
    }

    pub fn with_max(mut self, max: usize) -> Self {
        self.max_width = Some(max);
        self
    }
}

/// Left-aligned table whose column widths come from its data.
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

/// Column separator: double space.
const SEP: &str = "  ";

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Render header and rows. The last column is never padded, and an
    /// empty table prints nothing.
    pub fn render(&self, out: &mut impl Write) -> std::io::Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }
        let widths = self.compute_widths();

        let header: Vec<&str> = self.columns.iter().map(|c| c.name).collect();
        writeln!(out, "{}", self.line(&header, &widths))?;
        for row in &self.rows {
            let cells: Vec<&str> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| truncate(row.get(i).map_or("", String::as_str), col.max_width))
                .collect();
            writeln!(out, "{}", self.line(&cells, &widths))?;
        }
        Ok(())
    }

    fn line(&self, cells: &[&str], widths: &[usize]) -> String {
        let last = cells.len().saturating_sub(1);
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == last {
                    cell.to_string()
                } else {
                    format!("{:<width$}", cell, width = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join(SEP)
    }

    fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let data = self
                    .rows
                    .iter()
                    .map(|r| {
                        let cell = r.get(i).map_or("", String::as_str);
                        truncate(cell, col.max_width).chars().count()
                    })
                    .max()
                    .unwrap_or(0);
                data.max(col.name.len())
            })
            .collect()
    }
}

/// Cut `s` to at most `max` characters.
fn truncate(s: &str, max: Option<usize>) -> &str {
    match max {
        Some(max) => match s.char_indices().nth(max) {
            Some((idx, _)) => &s[..idx],
            None => s,
        },
        None => s,
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
