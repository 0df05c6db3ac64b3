//! Result formatting: JSON, Table, and Markdown output.
//!
//! Records are anything serializable to a JSON object. Table and Markdown
//! output pick the requested columns; a dotted column (`source.kind`)
//! reaches into nested objects.

use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!(
                "unknown format '{other}': expected json, table, or markdown"
            )),
        }
    }
}

/// Format `records` in the specified output format.
#[must_use]
pub fn format_records<T: Serialize>(
    records: &[T],
    columns: &[&str],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Json => format_json(records),
        OutputFormat::Table => format_table(&to_rows(records, columns), columns),
        OutputFormat::Markdown => format_markdown(&to_rows(records, columns), columns),
    }
}

fn format_json<T: Serialize>(records: &[T]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
}

fn to_rows<T: Serialize>(records: &[T], columns: &[&str]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            let value = serde_json::to_value(record).unwrap_or(Value::Null);
            columns
                .iter()
                .map(|col| lookup(&value, col).map_or_else(|| "-".to_string(), value_to_display))
                .collect()
        })
        .collect()
}

fn lookup<'v>(value: &'v Value, column: &str) -> Option<&'v Value> {
    column
        .split('.')
        .try_fold(value, |v, key| v.get(key))
        .filter(|v| !v.is_null())
}

fn format_table(rows: &[Vec<String>], columns: &[&str]) -> String {
    if rows.is_empty() {
        return "(no results)".to_string();
    }

    // Calculate column widths
    let mut widths: Vec<usize> = columns.iter().map(|c| display_len(c)).collect();
    for row in rows {
        for (i, val) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_len(val));
        }
    }

    let mut output = String::new();

    // Header
    let header: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| pad(c, widths[i]))
        .collect();
    output.push_str(header.join(" | ").trim_end());
    output.push('\n');

    // Separator
    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&sep.join("-+-"));
    output.push('\n');

    // Rows
    for row in rows {
        let vals: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, val)| pad(val, widths[i]))
            .collect();
        output.push_str(vals.join(" | ").trim_end());
        output.push('\n');
    }

    output
}

fn format_markdown(rows: &[Vec<String>], columns: &[&str]) -> String {
    if rows.is_empty() {
        return "*No results*\n".to_string();
    }

    let mut output = String::new();

    output.push_str("| ");
    output.push_str(&columns.join(" | "));
    output.push_str(" |\n");

    output.push_str("| ");
    let seps: Vec<&str> = columns.iter().map(|_| "---").collect();
    output.push_str(&seps.join(" | "));
    output.push_str(" |\n");

    for row in rows {
        output.push_str("| ");
        let vals: Vec<String> = row.iter().map(|v| v.replace('|', "\\|")).collect();
        output.push_str(&vals.join(" | "));
        output.push_str(" |\n");
    }

    output
}

fn value_to_display(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// Emoji icons make byte length useless for alignment.
fn display_len(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_len(s));
    format!("{s}{}", " ".repeat(fill))
}
