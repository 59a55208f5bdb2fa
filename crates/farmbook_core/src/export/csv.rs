//! Comma-separated ledger export.
//!
//! # Layout
//! ```text
//! index,measurement,selection,tool,result
//! <id>,<measurement:.2>,<selection>,<tool>,<result:.2>
//! ...
//!
//! total measurement,<.2>,,,
//! total selection,<int>,,,
//! total result,<.2>,,,
//! unit price,<.2>,,,
//! export date,<rfc3339>,,,
//! ```
//!
//! Every line has the header's column count. Cells containing a comma,
//! quote or line break are quoted with doubled inner quotes.

use crate::model::row::{LedgerSummary, Row};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

const HEADER: [&str; 5] = ["index", "measurement", "selection", "tool", "result"];
const FILE_NAME_PREFIX: &str = "Farming_Manager_Data_";

/// Renders ledger rows plus a trailing summary block.
pub fn render_ledger_csv(
    rows: &[Row],
    summary: &LedgerSummary,
    unit_price: f64,
    exported_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    push_line(&mut out, &HEADER.map(str::to_string));

    for row in rows {
        push_line(
            &mut out,
            &[
                row.id.to_string(),
                format!("{:.2}", row.measurement),
                row.selection.to_string(),
                row.tool.clone(),
                format!("{:.2}", row.result),
            ],
        );
    }

    out.push('\n');
    let summary_rows = [
        ("total measurement", format!("{:.2}", summary.total_measurement)),
        ("total selection", summary.total_selection.to_string()),
        ("total result", format!("{:.2}", summary.total_result)),
        ("unit price", format!("{unit_price:.2}")),
        (
            "export date",
            exported_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
    ];
    for (label, value) in summary_rows {
        push_line(
            &mut out,
            &[
                label.to_string(),
                value,
                String::new(),
                String::new(),
                String::new(),
            ],
        );
    }

    out
}

/// Suggested download name for an export produced on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{FILE_NAME_PREFIX}{}.csv", date.format("%Y-%m-%d"))
}

fn push_line(out: &mut String, cells: &[String]) {
    let line = cells
        .iter()
        .map(|cell| escape_cell(cell))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push('\n');
}

fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
