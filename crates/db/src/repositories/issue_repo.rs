//! Repository for the `issues` table.

use sqlx::PgPool;
use trapline_core::types::DbId;

use crate::models::issue::{CreateIssue, Issue, IssueFilter, UpdateIssue};

/// Column list for issues queries.
const COLUMNS: &str = "id, line_id, outing_id, issue_status, start_station_id, \
    end_station_id, station_type, issue_type, origin, reported_by, description, \
    photo_path, created_at, updated_at";

/// Typed bind value for dynamically-built issue queries.
enum BindValue {
    BigInt(DbId),
    Text(String),
}

/// Provides CRUD operations for issues.
pub struct IssueRepo;

impl IssueRepo {
    /// List issues matching the filter, newest first.
    pub async fn list(pool: &PgPool, filter: &IssueFilter) -> Result<Vec<Issue>, sqlx::Error> {
        let (where_clause, bind_values) = build_filter(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM issues {where_clause} ORDER BY created_at DESC, id DESC"
        );

        let mut q = sqlx::query_as::<_, Issue>(&query);
        for value in &bind_values {
            match value {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.clone()),
            }
        }
        q.fetch_all(pool).await
    }

    /// Find an issue by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM issues WHERE id = $1");
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new issue, returning the created row.
    ///
    /// `line_id` must already be resolved by the caller (from the outing,
    /// when the DTO omits it).
    pub async fn create(
        pool: &PgPool,
        line_id: DbId,
        input: &CreateIssue,
    ) -> Result<Issue, sqlx::Error> {
        let query = format!(
            "INSERT INTO issues \
                (line_id, outing_id, issue_status, start_station_id, end_station_id, \
                 station_type, issue_type, origin, reported_by, description, photo_path)
             VALUES ($1, $2, COALESCE($3, 'NeedsWork'), $4, $5, COALESCE($6, 'NA'), \
                     $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(line_id)
            .bind(input.outing_id)
            .bind(&input.issue_status)
            .bind(&input.start_station_id)
            .bind(&input.end_station_id)
            .bind(&input.station_type)
            .bind(&input.issue_type)
            .bind(&input.origin)
            .bind(&input.reported_by)
            .bind(&input.description)
            .bind(&input.photo_path)
            .fetch_one(pool)
            .await
    }

    /// Update an issue by ID, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIssue,
    ) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!(
            "UPDATE issues SET
                issue_status = COALESCE($2, issue_status),
                start_station_id = COALESCE($3, start_station_id),
                end_station_id = COALESCE($4, end_station_id),
                station_type = COALESCE($5, station_type),
                issue_type = COALESCE($6, issue_type),
                origin = COALESCE($7, origin),
                reported_by = COALESCE($8, reported_by),
                description = COALESCE($9, description),
                photo_path = COALESCE($10, photo_path),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .bind(&input.issue_status)
            .bind(&input.start_station_id)
            .bind(&input.end_station_id)
            .bind(&input.station_type)
            .bind(&input.issue_type)
            .bind(&input.origin)
            .bind(&input.reported_by)
            .bind(&input.description)
            .bind(&input.photo_path)
            .fetch_optional(pool)
            .await
    }

    /// Delete an issue by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build a WHERE clause and bind values from issue filter parameters.
fn build_filter(filter: &IssueFilter) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(line_id) = filter.line_id {
        conditions.push(format!("line_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(line_id));
    }
    if let Some(outing_id) = filter.outing_id {
        conditions.push(format!("outing_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(outing_id));
    }
    if let Some(ref status) = filter.issue_status {
        conditions.push(format!("issue_status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.clone()));
    }
    if let Some(ref issue_type) = filter.issue_type {
        conditions.push(format!("issue_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(issue_type.clone()));
    }
    if let Some(ref station_type) = filter.station_type {
        conditions.push(format!("station_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(station_type.clone()));
    }
    if let Some(ref search) = filter.q {
        conditions.push(format!(
            "(start_station_id ILIKE ${bind_idx} OR description ILIKE ${bind_idx})"
        ));
        bind_values.push(BindValue::Text(format!("%{search}%")));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}
