//! Repository for the `outings` table and the outing/team-member link table.

use sqlx::PgPool;
use trapline_core::types::{Date, DbId};

use crate::models::outing::{
    CreateOuting, Outing, OutingFilter, OutingWithParticipants, UpdateOuting,
};

/// Column list for plain outings queries.
const COLUMNS: &str = "id, line_id, date, completion_status, start_station_id, \
    end_station_id, hours, number_of_workers, created_at, updated_at";

/// SELECT list for outings joined with aggregated participant names.
const AGG_SELECT: &str = "\
    SELECT o.id, o.line_id, o.date, o.completion_status, o.start_station_id, \
           o.end_station_id, o.hours, o.number_of_workers, \
           COALESCE(ARRAY_AGG(tm.name ORDER BY tm.name) \
                    FILTER (WHERE tm.id IS NOT NULL), ARRAY[]::TEXT[]) AS participants, \
           o.created_at, o.updated_at \
    FROM outings o \
    LEFT JOIN outing_participants op ON op.outing_id = o.id \
    LEFT JOIN team_members tm ON tm.id = op.team_member_id";

/// Provides CRUD operations for outings, including the participant set.
pub struct OutingRepo;

impl OutingRepo {
    /// List outings with participant names, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &OutingFilter,
    ) -> Result<Vec<OutingWithParticipants>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if filter.line_id.is_some() {
            conditions.push(format!("o.line_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.date.is_some() {
            conditions.push(format!("o.date = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.completion_status.is_some() {
            conditions.push(format!("o.completion_status = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "{AGG_SELECT} {where_clause} GROUP BY o.id ORDER BY o.date DESC, o.id DESC"
        );

        let mut q = sqlx::query_as::<_, OutingWithParticipants>(&query);
        if let Some(line_id) = filter.line_id {
            q = q.bind(line_id);
        }
        if let Some(date) = filter.date {
            q = q.bind(date);
        }
        if let Some(ref status) = filter.completion_status {
            q = q.bind(status.clone());
        }
        q.fetch_all(pool).await
    }

    /// Find an outing (with participants) by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OutingWithParticipants>, sqlx::Error> {
        let query = format!("{AGG_SELECT} WHERE o.id = $1 GROUP BY o.id");
        sqlx::query_as::<_, OutingWithParticipants>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an outing by its natural key (line, date).
    pub async fn find_by_line_and_date(
        pool: &PgPool,
        line_id: DbId,
        date: Date,
    ) -> Result<Option<Outing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM outings WHERE line_id = $1 AND date = $2");
        sqlx::query_as::<_, Outing>(&query)
            .bind(line_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// Create a new outing and attach its participants in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOuting,
    ) -> Result<OutingWithParticipants, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO outings \
                (line_id, date, completion_status, start_station_id, end_station_id, \
                 hours, number_of_workers)
             VALUES ($1, $2, COALESCE($3, 'Completed'), $4, $5, \
                     COALESCE($6, 0), COALESCE($7, 1))
             RETURNING {COLUMNS}"
        );
        let outing = sqlx::query_as::<_, Outing>(&query)
            .bind(input.line_id)
            .bind(input.date)
            .bind(&input.completion_status)
            .bind(&input.start_station_id)
            .bind(&input.end_station_id)
            .bind(input.hours)
            .bind(input.number_of_workers)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(ref participant_ids) = input.participant_ids {
            for member_id in participant_ids {
                sqlx::query(
                    "INSERT INTO outing_participants (outing_id, team_member_id) \
                     VALUES ($1, $2) ON CONFLICT DO NOTHING",
                )
                .bind(outing.id)
                .bind(member_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        let created = Self::find_by_id(pool, outing.id).await?;
        created.ok_or(sqlx::Error::RowNotFound)
    }

    /// Update an outing by ID. A present `participant_ids` replaces the
    /// whole participant set. Returns the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOuting,
    ) -> Result<Option<OutingWithParticipants>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE outings SET
                date = COALESCE($2, date),
                completion_status = COALESCE($3, completion_status),
                start_station_id = COALESCE($4, start_station_id),
                end_station_id = COALESCE($5, end_station_id),
                hours = COALESCE($6, hours),
                number_of_workers = COALESCE($7, number_of_workers),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Outing>(&query)
            .bind(id)
            .bind(input.date)
            .bind(&input.completion_status)
            .bind(&input.start_station_id)
            .bind(&input.end_station_id)
            .bind(input.hours)
            .bind(input.number_of_workers)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(outing) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(ref participant_ids) = input.participant_ids {
            sqlx::query("DELETE FROM outing_participants WHERE outing_id = $1")
                .bind(outing.id)
                .execute(&mut *tx)
                .await?;
            for member_id in participant_ids {
                sqlx::query(
                    "INSERT INTO outing_participants (outing_id, team_member_id) \
                     VALUES ($1, $2) ON CONFLICT DO NOTHING",
                )
                .bind(outing.id)
                .bind(member_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Self::find_by_id(pool, outing.id).await
    }

    /// Delete an outing by ID, cascading to its issues and participant
    /// links. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM outings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
