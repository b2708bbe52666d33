//! Rendering of records and snapshots for the command line.

use pidstat::{Snapshot, StatRecord};
use std::fmt::Write as FmtWrite;

use crate::cli::OutputFormat;

/// Placeholder for fields a record does not have.
const MISSING: &str = "-";

/// Renders a snapshot in the requested format.
pub fn render_snapshot(
    snapshot: &Snapshot,
    format: OutputFormat,
    columns: &[String],
) -> Result<String, Box<dyn std::error::Error>> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(snapshot)?,
        OutputFormat::Yaml => serde_yaml::to_string(snapshot)?,
        OutputFormat::Table => {
            let rows: Vec<&StatRecord> = snapshot
                .pids()
                .into_iter()
                .filter_map(|pid| snapshot.get(pid))
                .collect();
            render_table(&rows, columns)
        }
    };
    Ok(out)
}

/// Renders a single record in the requested format.
pub fn render_record(
    record: &StatRecord,
    format: OutputFormat,
    columns: &[String],
) -> Result<String, Box<dyn std::error::Error>> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(record)?,
        OutputFormat::Yaml => serde_yaml::to_string(record)?,
        OutputFormat::Table => render_table(&[record], columns),
    };
    Ok(out)
}

/// Left-aligned table with one header row.
fn render_table(rows: &[&StatRecord], columns: &[String]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| {
                    record
                        .get(c)
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| MISSING.to_string())
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(c.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns.iter().map(|c| c.to_uppercase()).collect();
    write_row(&mut out, &header, &widths);
    for row in &cells {
        write_row(&mut out, row, &widths);
    }
    out
}

fn write_row(out: &mut String, row: &[String], widths: &[usize]) {
    let last = row.len().saturating_sub(1);
    for (i, (cell, width)) in row.iter().zip(widths).enumerate() {
        if i == last {
            let _ = write!(out, "{}", cell);
        } else {
            let _ = write!(out, "{:<width$}  ", cell, width = width);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pidstat::parse_stat_line;

    fn snapshot() -> Snapshot {
        ["1 (init) S 0 1", "300 (sshd) S 1 300", "42 (kworker) I 2 x"]
            .iter()
            .map(|line| {
                let record = parse_stat_line(line).into_record();
                let pid = record.integer("pid").expect("pid").to_string();
                (pid, record)
            })
            .collect()
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_table_sorted_with_missing_cells() {
        let out = render_snapshot(&snapshot(), OutputFormat::Table, &cols(&["pid", "pgrp", "comm"]))
            .expect("render table");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "PID  PGRP  COMM");
        assert_eq!(lines[1], "1    1     (init)");
        assert_eq!(lines[2], "42   -     (kworker)");
        assert_eq!(lines[3], "300  300   (sshd)");
    }

    #[test]
    fn test_json_keeps_types() {
        let out = render_snapshot(&snapshot(), OutputFormat::Json, &[]).expect("render json");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["1"]["pid"], 1);
        assert_eq!(value["1"]["comm"], "(init)");
        assert_eq!(value["42"]["ppid"], 2);
        assert!(value["42"].get("pgrp").is_none());
    }

    #[test]
    fn test_record_yaml() {
        let record = parse_stat_line("7 (sh) R 1").into_record();
        let out = render_record(&record, OutputFormat::Yaml, &[]).expect("render yaml");
        assert!(out.contains("(sh)"));
        assert!(out.contains("ppid: 1"));
    }
}
