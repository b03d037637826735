//! Completion-report sorting and CSV rendering.
//!
//! The report is recomputed in full on every request: the db layer
//! aggregates one row per line, and this module applies the requested
//! in-memory ordering and, for exports, renders the fixed-column CSV.

use serde::Serialize;

use crate::choices::LineType;
use crate::types::{Date, DbId};

/// Aggregated completion statistics for a single line.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub line_id: DbId,
    pub line_name: String,
    pub line_type: LineType,
    pub last_completed: Option<Date>,
    pub completed_count: i64,
    pub last_partial: Option<Date>,
    pub partial_count: i64,
    pub issues_count: i64,
    pub issues_unresolved_count: i64,
}

/// Recognized report sort fields.
///
/// An unrecognized `sort` query value parses to `None`, which leaves the
/// natural per-line order (line name ascending) unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    LastCompleted,
    LastPartial,
    CompletedCount,
    PartialCount,
    LineName,
    IssuesCount,
    IssuesUnresolvedCount,
}

impl SortField {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "last_completed" => Some(Self::LastCompleted),
            "last_partial" => Some(Self::LastPartial),
            "completed_count" => Some(Self::CompletedCount),
            "partial_count" => Some(Self::PartialCount),
            "line_name" => Some(Self::LineName),
            "issues_count" => Some(Self::IssuesCount),
            "issues_unresolved_count" => Some(Self::IssuesUnresolvedCount),
            _ => None,
        }
    }

    pub const ALL: &'static [&'static str] = &[
        "last_completed",
        "last_partial",
        "completed_count",
        "partial_count",
        "line_name",
        "issues_count",
        "issues_unresolved_count",
    ];
}

/// Sort direction for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than `"desc"` sorts ascending.
    pub fn from_str(s: &str) -> Self {
        if s == "desc" {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// Sort report rows in place by the given field and direction.
///
/// Absent dates compare as the minimum date, so lines never completed sink
/// to the bottom of a descending date sort.
pub fn sort_rows(rows: &mut [ReportRow], field: SortField, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = match field {
            SortField::LastCompleted => date_key(a.last_completed).cmp(&date_key(b.last_completed)),
            SortField::LastPartial => date_key(a.last_partial).cmp(&date_key(b.last_partial)),
            SortField::CompletedCount => a.completed_count.cmp(&b.completed_count),
            SortField::PartialCount => a.partial_count.cmp(&b.partial_count),
            SortField::LineName => a.line_name.cmp(&b.line_name),
            SortField::IssuesCount => a.issues_count.cmp(&b.issues_count),
            SortField::IssuesUnresolvedCount => {
                a.issues_unresolved_count.cmp(&b.issues_unresolved_count)
            }
        };
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

fn date_key(date: Option<Date>) -> Date {
    date.unwrap_or(Date::MIN)
}

/// Fixed CSV column headers for the exported report.
pub const CSV_HEADERS: &[&str] = &[
    "Line Name",
    "Type",
    "Last Completed",
    "Last Partial",
    "Completed Count",
    "Partial Count",
    "Unresolved Issues",
    "Total Issues",
];

/// Render report rows as CSV with the fixed column headers.
///
/// Absent dates render as `Never`; the line type renders its display label.
pub fn render_csv(rows: &[ReportRow]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for row in rows {
        writer.write_record(&[
            row.line_name.clone(),
            row.line_type.label().to_string(),
            format_date(row.last_completed),
            format_date(row.last_partial),
            row.completed_count.to_string(),
            row.partial_count.to_string(),
            row.issues_unresolved_count.to_string(),
            row.issues_count.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .expect("flushing to an in-memory buffer cannot fail");
    // The writer only ever receives UTF-8 input.
    Ok(String::from_utf8(bytes).expect("csv output is utf-8"))
}

fn format_date(date: Option<Date>) -> String {
    match date {
        Some(d) => d.to_string(),
        None => "Never".to_string(),
    }
}
