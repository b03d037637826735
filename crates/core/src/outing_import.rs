//! Row parsing for the outing field-report import.
//!
//! The source file is tab-delimited with a fixed column layout and a fixed
//! number of leading header rows. Parsing is lenient where the field data
//! is known to be messy: malformed hours/workers fall back to defaults and
//! unrecognized completion-status text counts as completed. Only a missing
//! date/line name or an unparseable date rejects a row.

use crate::choices::{CompletionStatus, IssueType};
use crate::types::Date;

/// Number of header rows to skip before data begins.
pub const HEADER_ROWS: usize = 4;

/// Fixed column positions in the outing file.
pub const COL_DATE: usize = 0;
pub const COL_LINE_NAME: usize = 1;
pub const COL_STATUS: usize = 2;
pub const COL_START_STATION: usize = 3;
pub const COL_END_STATION: usize = 4;
pub const COL_HOURS: usize = 5;
pub const COL_WORKERS: usize = 6;
pub const COL_NOTES: usize = 9;
pub const COL_INITIALS: usize = 10;

/// Hours recorded when the column is missing or malformed.
pub const DEFAULT_HOURS: f64 = 0.0;
/// Worker count recorded when the column is missing or malformed.
pub const DEFAULT_WORKERS: f64 = 1.0;

/// A successfully parsed outing row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOutingRow {
    pub date: Date,
    pub line_name: String,
    pub completion_status: CompletionStatus,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub hours: f64,
    pub workers: f64,
    pub notes: Option<String>,
    pub initials: Vec<String>,
}

/// Parse one data row. Returns a skip reason on failure.
pub fn parse_row(fields: &[&str]) -> Result<ParsedOutingRow, String> {
    if fields.len() < 2 {
        return Err(format!("row has {} columns, expected at least 2", fields.len()));
    }

    let date_str = field(fields, COL_DATE);
    let line_name = field(fields, COL_LINE_NAME);

    let (Some(date_str), Some(line_name)) = (date_str, line_name) else {
        return Err("missing date or line name".to_string());
    };

    let date = Date::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| format!("invalid date format: {date_str}"))?;

    let completion_status =
        map_completion_status(field(fields, COL_STATUS).unwrap_or_default());

    let hours = field(fields, COL_HOURS)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(DEFAULT_HOURS);

    let workers = field(fields, COL_WORKERS)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(DEFAULT_WORKERS);

    Ok(ParsedOutingRow {
        date,
        line_name: line_name.to_string(),
        completion_status,
        start_station: field(fields, COL_START_STATION).map(str::to_string),
        end_station: field(fields, COL_END_STATION).map(str::to_string),
        hours,
        workers,
        notes: field(fields, COL_NOTES).map(str::to_string),
        initials: split_initials(field(fields, COL_INITIALS).unwrap_or_default()),
    })
}

/// Map completion-status text through the field vocabulary.
///
/// `Tagged` and `TaggedPart` are historical markers for a partially worked
/// line; anything unrecognized counts as completed.
pub fn map_completion_status(text: &str) -> CompletionStatus {
    match text {
        "Partial" | "Tagged" | "TaggedPart" => CompletionStatus::Partial,
        _ => CompletionStatus::Completed,
    }
}

/// Split a comma-separated list of participant initials.
pub fn split_initials(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classify a free-text note into an issue type.
///
/// First issue type whose display label occurs (case-insensitively) in the
/// note wins; notes that match nothing are filed as `Complicated`.
pub fn classify_note(note: &str) -> IssueType {
    let lowered = note.to_lowercase();
    for issue_type in IssueType::VARIANTS {
        if lowered.contains(&issue_type.label().to_lowercase()) {
            return *issue_type;
        }
    }
    IssueType::Complicated
}

/// A trimmed, non-empty field at position `idx`, if present.
fn field<'a>(fields: &[&'a str], idx: usize) -> Option<&'a str> {
    fields.get(idx).map(|s| s.trim()).filter(|s| !s.is_empty())
}
