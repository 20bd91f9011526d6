//! Result formatting.
//!
//! `Presentation` is the transport-agnostic view of an execution outcome;
//! `OutputFormatter` turns it into text for the terminal (box table, JSON, or
//! CSV).

use serde::Serialize;
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::db::Value;
use crate::error::{QuillError, Result};
use crate::query::ExecutionOutcome;

/// Notice shown when a statement succeeds without returning rows.
pub const NO_DATA_MESSAGE: &str = "No data found for the given query.";

/// Maximum column width before truncation in table output.
const MAX_COLUMN_WIDTH: usize = 40;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// What the user sees for one outcome. Exactly one variant applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Presentation {
    /// The store reported an error; `message` is its text verbatim.
    Error { message: String },

    /// The statement succeeded but returned no rows.
    Empty { message: String },

    /// Rows in execution order under headers in result order. Values keep
    /// their store types so JSON output shows numbers as numbers.
    Rows {
        headers: Vec<String>,
        rows: Vec<Vec<Value>>,
        #[serde(skip)]
        execution_time: Duration,
    },
}

impl Presentation {
    /// Maps an execution outcome to its presentation.
    pub fn from_outcome(outcome: &ExecutionOutcome) -> Self {
        match outcome {
            ExecutionOutcome::Failure(message) => Self::Error {
                message: message.clone(),
            },
            ExecutionOutcome::Success(result) if result.is_empty() => Self::Empty {
                message: NO_DATA_MESSAGE.to_string(),
            },
            ExecutionOutcome::Success(result) => Self::Rows {
                headers: result.columns.iter().map(|c| c.name.clone()).collect(),
                rows: result.rows.clone(),
                execution_time: result.execution_time,
            },
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Box-drawn table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// Comma-separated values.
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!(
                "Invalid output format: {s}. Expected: table, json, or csv"
            )),
        }
    }
}

/// Formats presentations for display.
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    format: OutputFormat,
    color: bool,
}

impl OutputFormatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    /// Formats an execution outcome.
    pub fn format_outcome(&self, outcome: &ExecutionOutcome) -> Result<String> {
        self.format_presentation(&Presentation::from_outcome(outcome))
    }

    /// Formats a presentation according to the configured format.
    pub fn format_presentation(&self, presentation: &Presentation) -> Result<String> {
        match self.format {
            OutputFormat::Table => Ok(self.format_table(presentation)),
            OutputFormat::Json => self.format_json(presentation),
            OutputFormat::Csv => Ok(self.format_csv(presentation)),
        }
    }

    /// Formats a message that is not tied to a query outcome (e.g. an LLM
    /// failure) in the error style.
    pub fn format_error(&self, category: &str, message: &str) -> String {
        match self.format {
            OutputFormat::Json => serde_json::json!({
                "status": "error",
                "category": category,
                "message": message,
            })
            .to_string(),
            _ => self.paint(RED, &format!("{category}: {message}")),
        }
    }

    /// Formats the generated SQL for display above the result.
    pub fn format_sql(&self, sql: &str) -> String {
        format!("Generated SQL:\n  {}", sql.replace('\n', "\n  "))
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn format_table(&self, presentation: &Presentation) -> String {
        match presentation {
            Presentation::Error { message } => {
                self.paint(RED, &format!("SQL Error: {message}"))
            }
            Presentation::Empty { message } => self.paint(YELLOW, message),
            Presentation::Rows {
                headers,
                rows,
                execution_time,
            } => render_grid(headers, &display_rows(rows), *execution_time),
        }
    }

    fn format_json(&self, presentation: &Presentation) -> Result<String> {
        serde_json::to_string_pretty(presentation)
            .map_err(|e| QuillError::internal(format!("Failed to serialize result: {e}")))
    }

    fn format_csv(&self, presentation: &Presentation) -> String {
        match presentation {
            Presentation::Error { message } => {
                self.paint(RED, &format!("SQL Error: {message}"))
            }
            Presentation::Empty { .. } => String::new(),
            Presentation::Rows { headers, rows, .. } => {
                let mut output = csv_line(headers);
                for row in display_rows(rows) {
                    output.push_str(&csv_line(&row));
                }
                output
            }
        }
    }
}

fn display_rows(rows: &[Vec<Value>]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(Value::to_display_string).collect())
        .collect()
}

/// Renders headers and rows as a box-drawn grid with a row-count footer.
fn render_grid(headers: &[String], rows: &[Vec<String>], execution_time: Duration) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(display_width(cell));
            }
        }
    }
    for width in widths.iter_mut() {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }

    let mut output = String::new();
    output.push_str(&border(&widths, '┌', '┬', '┐'));
    output.push_str(&grid_line(headers, &widths));
    output.push_str(&border(&widths, '├', '┼', '┤'));
    for row in rows {
        output.push_str(&grid_line(row, &widths));
    }
    output.push_str(&border(&widths, '└', '┴', '┘'));

    let row_label = if rows.len() == 1 { "row" } else { "rows" };
    output.push_str(&format!(
        "({} {}, {:.3} ms)",
        rows.len(),
        row_label,
        execution_time.as_secs_f64() * 1000.0
    ));
    output
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (idx, width) in widths.iter().enumerate() {
        line.push_str(&"─".repeat(width + 2));
        line.push(if idx == widths.len() - 1 { right } else { middle });
    }
    line.push('\n');
    line
}

fn grid_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("│");
    for (cell, width) in cells.iter().zip(widths) {
        let truncated = truncate_value(cell, *width);
        let padding = width.saturating_sub(display_width(&truncated));
        line.push(' ');
        line.push_str(&truncated);
        line.push_str(&" ".repeat(padding));
        line.push_str(" │");
    }
    line.push('\n');
    line
}

/// Terminal columns occupied by `value`; CJK and emoji take two.
fn display_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

/// Truncates a string to at most `max_width` terminal columns, ending in an
/// ellipsis when there is room for one.
fn truncate_value(value: &str, max_width: usize) -> String {
    if display_width(value) <= max_width {
        return value.to_string();
    }

    let budget = if max_width <= 3 { max_width } else { max_width - 3 };
    let mut truncated = String::new();
    let mut used = 0;
    for ch in value.chars() {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + width > budget {
            break;
        }
        truncated.push(ch);
        used += width;
    }

    if max_width > 3 {
        truncated.push_str("...");
    }
    truncated
}

fn csv_line(cells: &[String]) -> String {
    let mut line = cells
        .iter()
        .map(|cell| csv_escape(cell))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
