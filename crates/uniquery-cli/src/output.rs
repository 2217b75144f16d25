//! Result formatting for the three `--output` modes named in §6: a
//! `tabled` grid for humans, pretty JSON, and the raw rows untouched.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde_json::Value as Json;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputMode;

pub fn format_rows(rows: &[Json], mode: OutputMode) -> String {
    match mode {
        OutputMode::Table => format_table(rows),
        OutputMode::Json => serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string()),
        OutputMode::Raw => format_raw(rows),
    }
}

fn format_table(rows: &[Json]) -> String {
    let colored = std::io::stdout().is_terminal();

    if rows.is_empty() {
        let message = "(no rows)";
        return if colored { message.dimmed().to_string() } else { message.to_string() };
    }

    let columns = column_order(rows);
    let mut builder = Builder::default();
    builder.push_record(columns.iter().cloned());
    for row in rows {
        builder.push_record(columns.iter().map(|column| cell(row, column)));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

fn format_raw(rows: &[Json]) -> String {
    rows.iter()
        .map(|row| row.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Column order is the union of every row's top-level keys, in first-seen
/// order, so a result set with heterogeneous documents still prints a
/// stable grid.
fn column_order(rows: &[Json]) -> Vec<String> {
    let mut columns = Vec::new();
    for row in rows {
        if let Json::Object(map) = row {
            for key in map.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

fn cell(row: &Json, column: &str) -> String {
    match row.get(column) {
        Some(Json::String(s)) => s.clone(),
        Some(Json::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_mode_pretty_prints_the_rows() {
        let rows = vec![json!({ "id": 1 })];
        let output = format_rows(&rows, OutputMode::Json);
        assert!(output.contains("\"id\": 1"));
    }

    #[test]
    fn raw_mode_prints_one_compact_line_per_row() {
        let rows = vec![json!({ "id": 1 }), json!({ "id": 2 })];
        let output = format_rows(&rows, OutputMode::Raw);
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn table_mode_handles_an_empty_result_set() {
        let output = format_rows(&[], OutputMode::Table);
        assert!(output.contains("no rows"));
    }

    #[test]
    fn table_mode_renders_heterogeneous_columns() {
        let rows = vec![json!({ "id": 1, "name": "Alice" }), json!({ "id": 2 })];
        let output = format_rows(&rows, OutputMode::Table);
        assert!(output.contains("id"));
        assert!(output.contains("name"));
        assert!(output.contains("Alice"));
    }
}
