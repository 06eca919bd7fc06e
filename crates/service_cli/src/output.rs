//! Result rendering as table, JSON or CSV.

use std::io::Write;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// A command result that can be rendered in every output format.
///
/// JSON uses the `Serialize` impl; table and CSV use `headers` and `rows`.
pub trait Report: Serialize {
    /// Column names.
    fn headers(&self) -> Vec<&'static str>;

    /// One entry per column for each row.
    fn rows(&self) -> Vec<Vec<String>>;

    /// Extra lines shown under a table.
    fn notes(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Writes `report` to `out` in `format`.
pub fn render<W: Write, R: Report>(out: &mut W, format: OutputFormat, report: &R) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(report.headers())?;
            for row in report.rows() {
                writer.write_record(&row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => write_table(out, report)?,
    }
    Ok(())
}

fn write_table<W: Write, R: Report>(out: &mut W, report: &R) -> Result<()> {
    let headers = report.headers();
    let rows = report.rows();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(headers.clone()))?;
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    writeln!(out, "{}", line(rule.iter().map(String::as_str).collect()))?;
    for row in &rows {
        writeln!(out, "{}", line(row.iter().map(String::as_str).collect()))?;
    }

    let notes = report.notes();
    if !notes.is_empty() {
        writeln!(out)?;
        for note in notes {
            writeln!(out, "{}", note)?;
        }
    }
    Ok(())
}

/// Fixed six-decimal rendering.
pub fn fmt_value(value: f64) -> String {
    format!("{:.6}", value)
}

/// Six decimals, or an empty cell for a missing value.
pub fn fmt_optional(value: Option<f64>) -> String {
    value.map(fmt_value).unwrap_or_default()
}
