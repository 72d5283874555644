// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn render_to_string(table: &Table) -> String {
    let mut buf = Vec::new();
    table.render(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn empty_table_prints_nothing() {
    let table = Table::new(vec![Column::new("NAME"), Column::new("AUTO")]);
    assert_eq!(render_to_string(&table), "");
}

#[test]
fn columns_are_padded_to_widest_cell() {
    let mut table = Table::new(vec![Column::new("NAME"), Column::new("AUTO")]);
    table.row(vec!["network".into(), "git, ssh".into()]);
    table.row(vec!["always".into(), "-".into()]);
    let out = render_to_string(&table);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines, ["NAME     AUTO", "network  git, ssh", "always   -"]);
}

#[test]
fn header_wider_than_data_sets_the_width() {
    let mut table = Table::new(vec![Column::new("STRATEGY"), Column::new("X")]);
    table.row(vec!["a".into(), "b".into()]);
    let out = render_to_string(&table);
    assert_eq!(out.lines().nth(1), Some("a         b"));
}

#[test]
fn max_width_truncates() {
    let mut table = Table::new(vec![Column::new("NAME"), Column::new("AUTO").with_max(5)]);
    table.row(vec!["network".into(), "git, scp, ssh".into()]);
    let out = render_to_string(&table);
    assert_eq!(out.lines().nth(1), Some("network  git, "));
}

#[test]
fn missing_cells_render_empty() {
    let mut table = Table::new(vec![Column::new("A"), Column::new("B")]);
    table.row(vec!["only".into()]);
    let out = render_to_string(&table);
    assert_eq!(out.lines().nth(1), Some("only  "));
}
