//! Baitout import: pipe-delimited issue reports into issues.
//!
//! Station names are resolved to lines with the candidate-name heuristics
//! in `trapline_core::baitout_import`; issue text is classified into
//! station and issue types by ordered regex pattern lists. Always
//! append-only; `commit = false` logs what would be created without
//! writing.

use std::collections::HashMap;
use std::io::Read;

use sqlx::PgPool;
use trapline_core::baitout_import::{
    match_issue_type, match_station_type, parse_row, resolve_station, LineRef,
};
use trapline_core::choices::IssueStatus;

/// Options for a baitout import run.
#[derive(Debug, Clone)]
pub struct BaitoutImportOptions {
    /// Persist created issues; otherwise dry-run (log only).
    pub commit: bool,
    /// Cap on created rows; `0` means unlimited.
    pub limit: usize,
    /// Origin tag stamped on every created issue.
    pub tag: String,
}

/// Counters reported after a baitout import run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BaitoutImportSummary {
    pub created: usize,
    pub skipped: usize,
}

#[derive(Debug, sqlx::FromRow)]
struct LineRangeRow {
    id: i64,
    name: String,
    start_station_id: String,
    end_station_id: String,
}

/// Run the baitout import over a pipe-delimited reader.
///
/// The whole run executes in one transaction.
pub async fn run<R: Read>(
    pool: &PgPool,
    reader: R,
    opts: &BaitoutImportOptions,
) -> anyhow::Result<BaitoutImportSummary> {
    if opts.commit {
        tracing::warn!("Committing data");
    } else {
        tracing::warn!("Dry run only, rerun with --commit to persist data");
    }
    if opts.limit > 0 {
        tracing::warn!(limit = opts.limit, "Limited to first rows");
    }

    // Load the full line map once; the file references lines by fuzzy name.
    let lines_by_name: HashMap<String, LineRef> = sqlx::query_as::<_, LineRangeRow>(
        "SELECT id, name, start_station_id, end_station_id FROM lines",
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        (
            row.name.clone(),
            LineRef {
                id: row.id,
                name: row.name,
                start_station_id: row.start_station_id,
                end_station_id: row.end_station_id,
            },
        )
    })
    .collect();

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut summary = BaitoutImportSummary::default();
    let mut tx = pool.begin().await?;

    for (row_num, record) in csv_reader.records().enumerate() {
        if opts.limit > 0 && summary.created >= opts.limit {
            break;
        }

        let record = record?;
        let fields: Vec<&str> = record.iter().collect();

        let row = match parse_row(&fields) {
            Ok(row) => row,
            Err(reason) => {
                tracing::warn!(row = row_num, %reason, "Skipping row");
                summary.skipped += 1;
                continue;
            }
        };

        let Some((station_number, line)) = resolve_station(&row.station_name, &lines_by_name)
        else {
            tracing::error!(
                row = row_num,
                station = %row.station_name,
                "Failed to identify line",
            );
            summary.skipped += 1;
            continue;
        };

        let issue_type = match_issue_type(&row.issue_text);
        let station_type = match_station_type(&row.issue_text);

        if opts.commit {
            sqlx::query(
                "INSERT INTO issues \
                    (line_id, issue_status, start_station_id, end_station_id, \
                     station_type, issue_type, description, origin, reported_by) \
                 VALUES ($1, $2, $3, '', $4, $5, $6, $7, $8)",
            )
            .bind(line.id)
            .bind(IssueStatus::NeedsWork.as_str())
            .bind(station_number.to_string())
            .bind(station_type.as_str())
            .bind(issue_type.as_str())
            .bind(&row.issue_text)
            .bind(&opts.tag)
            .bind(&row.person)
            .execute(&mut *tx)
            .await?;
        } else {
            tracing::info!(
                line = %line.name,
                station = station_number,
                station_type = %station_type,
                issue_type = %issue_type,
                tag = %opts.tag,
                person = %row.person,
                text = %row.issue_text,
                "Would create issue",
            );
        }
        summary.created += 1;
        tracing::info!(
            row = row_num,
            line = %line.name,
            date = %row.date,
            "Created issue",
        );
    }

    tx.commit().await?;

    tracing::info!(
        created = summary.created,
        skipped = summary.skipped,
        commit = opts.commit,
        "Baitout import finished",
    );

    Ok(summary)
}
