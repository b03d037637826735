//! Repository for the `lines` table.

use sqlx::PgPool;
use trapline_core::types::DbId;

use crate::models::line::{CreateLine, Line, LineWithCounts, UpdateLine};

/// Column list for lines queries.
const COLUMNS: &str = "id, name, line_type, start_station_id, end_station_id, created_at, updated_at";

/// Provides CRUD operations for lines.
pub struct LineRepo;

impl LineRepo {
    /// List lines with their outing/issue statistics, ordered by name.
    ///
    /// Optional filters: exact `line_type` and a case-insensitive search
    /// over name and station ids.
    pub async fn list(
        pool: &PgPool,
        line_type: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<LineWithCounts>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if line_type.is_some() {
            conditions.push(format!("l.line_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if search.is_some() {
            conditions.push(format!(
                "(l.name ILIKE ${bind_idx} OR l.start_station_id ILIKE ${bind_idx} \
                 OR l.end_station_id ILIKE ${bind_idx})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT l.id, l.name, l.line_type, l.start_station_id, l.end_station_id, \
                 (SELECT COUNT(*) FROM outings o WHERE o.line_id = l.id) AS outing_count, \
                 (SELECT COUNT(*) FROM outings o WHERE o.line_id = l.id \
                     AND o.completion_status = 'Completed') AS completed_outings_count, \
                 (SELECT COUNT(*) FROM issues i WHERE i.line_id = l.id) AS issue_count, \
                 l.created_at, l.updated_at \
             FROM lines l \
             {where_clause} \
             ORDER BY l.name ASC"
        );

        let mut q = sqlx::query_as::<_, LineWithCounts>(&query);
        if let Some(lt) = line_type {
            q = q.bind(lt.to_string());
        }
        if let Some(s) = search {
            q = q.bind(format!("%{s}%"));
        }
        q.fetch_all(pool).await
    }

    /// Find a line by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Line>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lines WHERE id = $1");
        sqlx::query_as::<_, Line>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a line by its exact name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Line>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lines WHERE name = $1");
        sqlx::query_as::<_, Line>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all lines ordered by name (used by exports).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Line>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lines ORDER BY name ASC");
        sqlx::query_as::<_, Line>(&query).fetch_all(pool).await
    }

    /// Create a new line, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLine) -> Result<Line, sqlx::Error> {
        let query = format!(
            "INSERT INTO lines (name, line_type, start_station_id, end_station_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Line>(&query)
            .bind(&input.name)
            .bind(&input.line_type)
            .bind(&input.start_station_id)
            .bind(&input.end_station_id)
            .fetch_one(pool)
            .await
    }

    /// Update a line by ID, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLine,
    ) -> Result<Option<Line>, sqlx::Error> {
        let query = format!(
            "UPDATE lines SET
                name = COALESCE($2, name),
                line_type = COALESCE($3, line_type),
                start_station_id = COALESCE($4, start_station_id),
                end_station_id = COALESCE($5, end_station_id),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Line>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.line_type)
            .bind(&input.start_station_id)
            .bind(&input.end_station_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a line by ID, cascading to its outings and issues.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
