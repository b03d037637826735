//! Aggregation queries backing the completion report.

use sqlx::PgPool;
use trapline_core::choices::{CompletionStatus, IssueStatus, LineType};
use trapline_core::report::ReportRow;
use trapline_core::types::{Date, DbId};

/// Raw aggregation row before enum conversion.
#[derive(Debug, sqlx::FromRow)]
struct CompletionRow {
    line_id: DbId,
    line_name: String,
    line_type: String,
    last_completed: Option<Date>,
    completed_count: i64,
    last_partial: Option<Date>,
    partial_count: i64,
    issues_count: i64,
    issues_unresolved_count: i64,
}

/// Read-only completion statistics, recomputed in full per call.
pub struct ReportRepo;

impl ReportRepo {
    /// One aggregated row per line, in natural order (line name ascending).
    pub async fn completion_rows(pool: &PgPool) -> Result<Vec<ReportRow>, sqlx::Error> {
        let resolved: Vec<String> = IssueStatus::RESOLVED
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = sqlx::query_as::<_, CompletionRow>(
            "SELECT \
                 l.id AS line_id, \
                 l.name AS line_name, \
                 l.line_type, \
                 (SELECT MAX(o.date) FROM outings o \
                     WHERE o.line_id = l.id AND o.completion_status = $1) AS last_completed, \
                 (SELECT COUNT(*) FROM outings o \
                     WHERE o.line_id = l.id AND o.completion_status = $1) AS completed_count, \
                 (SELECT MAX(o.date) FROM outings o \
                     WHERE o.line_id = l.id AND o.completion_status = $2) AS last_partial, \
                 (SELECT COUNT(*) FROM outings o \
                     WHERE o.line_id = l.id AND o.completion_status = $2) AS partial_count, \
                 (SELECT COUNT(*) FROM issues i WHERE i.line_id = l.id) AS issues_count, \
                 (SELECT COUNT(*) FROM issues i \
                     WHERE i.line_id = l.id AND i.issue_status <> ALL($3)) \
                     AS issues_unresolved_count \
             FROM lines l \
             ORDER BY l.name ASC",
        )
        .bind(CompletionStatus::Completed.as_str())
        .bind(CompletionStatus::Partial.as_str())
        .bind(&resolved)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ReportRow {
                line_id: r.line_id,
                line_name: r.line_name,
                line_type: LineType::from_str(&r.line_type).unwrap_or(LineType::Transect),
                last_completed: r.last_completed,
                completed_count: r.completed_count,
                last_partial: r.last_partial,
                partial_count: r.partial_count,
                issues_count: r.issues_count,
                issues_unresolved_count: r.issues_unresolved_count,
            })
            .collect())
    }
}
