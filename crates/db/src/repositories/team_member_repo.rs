//! Repository for the `team_members` table.

use sqlx::PgPool;
use trapline_core::types::DbId;

use crate::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};

/// Column list for team_members queries.
const COLUMNS: &str = "id, name, email_address, available, created_at, updated_at";

/// Provides CRUD operations for team members.
pub struct TeamMemberRepo;

impl TeamMemberRepo {
    /// List team members, available ones first, then by name.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
    ) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query = match search {
            Some(_) => format!(
                "SELECT {COLUMNS} FROM team_members \
                 WHERE name ILIKE $1 OR email_address ILIKE $1 \
                 ORDER BY available DESC, name ASC"
            ),
            None => format!(
                "SELECT {COLUMNS} FROM team_members ORDER BY available DESC, name ASC"
            ),
        };

        let mut q = sqlx::query_as::<_, TeamMember>(&query);
        if let Some(s) = search {
            q = q.bind(format!("%{s}%"));
        }
        q.fetch_all(pool).await
    }

    /// Find a team member by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members WHERE id = $1");
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a team member by exact name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members WHERE name = $1");
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Create a new team member, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTeamMember,
    ) -> Result<TeamMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_members (name, email_address, available)
             VALUES ($1, $2, COALESCE($3, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(&input.name)
            .bind(&input.email_address)
            .bind(input.available)
            .fetch_one(pool)
            .await
    }

    /// Update a team member by ID, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeamMember,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "UPDATE team_members SET
                name = COALESCE($2, name),
                email_address = COALESCE($3, email_address),
                available = COALESCE($4, available),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email_address)
            .bind(input.available)
            .fetch_optional(pool)
            .await
    }

    /// Delete a team member by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
