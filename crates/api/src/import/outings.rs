//! Outing import: tab-delimited field reports into outings, participants,
//! and note-derived issues.
//!
//! Outings are get-or-created on (line, date), so re-running the import
//! does not duplicate them. Participant initials auto-create team members.
//! A non-empty note spawns one issue per row, classified by the first
//! issue-type label found in the note.

use std::io::Read;

use sqlx::PgPool;
use trapline_core::choices::{IssueStatus, StationType};
use trapline_core::outing_import::{classify_note, parse_row, HEADER_ROWS};
use trapline_core::types::DbId;

/// Counters reported after an outing import run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutingImportSummary {
    pub created_outings: usize,
    pub existing_outings: usize,
    pub created_issues: usize,
    pub created_members: usize,
    pub skipped_rows: usize,
}

#[derive(Debug, sqlx::FromRow)]
struct IdRow {
    id: DbId,
}

/// Run the outing import over a tab-delimited reader.
///
/// The whole run commits in one transaction.
pub async fn run<R: Read>(pool: &PgPool, reader: R) -> anyhow::Result<OutingImportSummary> {
    let mut text = String::new();
    let mut reader = reader;
    reader.read_to_string(&mut text)?;

    // Skip the fixed header rows before handing the rest to the csv reader.
    let data: String = text
        .lines()
        .skip(HEADER_ROWS)
        .collect::<Vec<_>>()
        .join("\n");

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut summary = OutingImportSummary::default();
    let mut tx = pool.begin().await?;

    for (idx, record) in csv_reader.records().enumerate() {
        let row_num = idx + HEADER_ROWS + 1;
        let record = record?;
        let fields: Vec<&str> = record.iter().collect();

        let row = match parse_row(&fields) {
            Ok(row) => row,
            Err(reason) => {
                tracing::warn!(row = row_num, %reason, "Skipping row");
                summary.skipped_rows += 1;
                continue;
            }
        };

        // Resolve the line by exact name.
        let line = sqlx::query_as::<_, IdRow>("SELECT id FROM lines WHERE name = $1")
            .bind(&row.line_name)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(line) = line else {
            tracing::error!(row = row_num, line = %row.line_name, "Line not found");
            summary.skipped_rows += 1;
            continue;
        };

        // Get-or-create the outing on its (line, date) natural key.
        let existing = sqlx::query_as::<_, IdRow>(
            "SELECT id FROM outings WHERE line_id = $1 AND date = $2",
        )
        .bind(line.id)
        .bind(row.date)
        .fetch_optional(&mut *tx)
        .await?;

        let outing_id = match existing {
            Some(outing) => {
                tracing::warn!(
                    row = row_num,
                    line = %row.line_name,
                    date = %row.date,
                    "Outing already exists",
                );
                summary.existing_outings += 1;
                outing.id
            }
            None => {
                let outing = sqlx::query_as::<_, IdRow>(
                    "INSERT INTO outings \
                        (line_id, date, completion_status, start_station_id, \
                         end_station_id, hours, number_of_workers) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
                )
                .bind(line.id)
                .bind(row.date)
                .bind(row.completion_status.as_str())
                .bind(&row.start_station)
                .bind(&row.end_station)
                .bind(row.hours)
                .bind(row.workers)
                .fetch_one(&mut *tx)
                .await?;
                tracing::info!(
                    row = row_num,
                    line = %row.line_name,
                    date = %row.date,
                    "Created outing",
                );
                summary.created_outings += 1;
                outing.id
            }
        };

        // Attach participants, auto-creating unseen initials.
        for initial in &row.initials {
            let member =
                sqlx::query_as::<_, IdRow>("SELECT id FROM team_members WHERE name = $1")
                    .bind(initial)
                    .fetch_optional(&mut *tx)
                    .await?;
            let member_id = match member {
                Some(member) => member.id,
                None => {
                    let member = sqlx::query_as::<_, IdRow>(
                        "INSERT INTO team_members (name) VALUES ($1) RETURNING id",
                    )
                    .bind(initial)
                    .fetch_one(&mut *tx)
                    .await?;
                    tracing::info!(name = %initial, "Created team member");
                    summary.created_members += 1;
                    member.id
                }
            };
            sqlx::query(
                "INSERT INTO outing_participants (outing_id, team_member_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(outing_id)
            .bind(member_id)
            .execute(&mut *tx)
            .await?;
        }

        // A note spawns one issue for this outing.
        if let Some(ref notes) = row.notes {
            let issue_type = classify_note(notes);
            sqlx::query(
                "INSERT INTO issues \
                    (line_id, outing_id, issue_status, start_station_id, end_station_id, \
                     station_type, issue_type, description) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(line.id)
            .bind(outing_id)
            .bind(IssueStatus::NeedsWork.as_str())
            .bind(row.start_station.clone().unwrap_or_default())
            .bind(&row.end_station)
            .bind(StationType::Novacoil.as_str())
            .bind(issue_type.as_str())
            .bind(notes)
            .execute(&mut *tx)
            .await?;
            tracing::info!(
                row = row_num,
                line = %row.line_name,
                issue_type = %issue_type,
                "Created issue from note",
            );
            summary.created_issues += 1;
        }
    }

    tx.commit().await?;

    tracing::info!(
        created_outings = summary.created_outings,
        existing_outings = summary.existing_outings,
        created_issues = summary.created_issues,
        created_members = summary.created_members,
        skipped_rows = summary.skipped_rows,
        "Outing import finished",
    );

    Ok(summary)
}
