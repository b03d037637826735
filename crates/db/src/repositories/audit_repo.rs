//! Repository for the `audit_logs` table.
//!
//! Audit rows are append-only: this repository deliberately has no update
//! or delete methods.

use sqlx::PgPool;
use trapline_core::types::Timestamp;

use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog};

/// Column list for audit_logs queries.
const COLUMNS: &str = "id, action, username, ip_address, timestamp";

/// Typed bind value for dynamically-built audit queries.
enum BindValue {
    Text(String),
    Timestamp(Timestamp),
}

/// Provides append and query operations for audit logs.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append a single audit log entry.
    pub async fn insert(pool: &PgPool, entry: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs (action, username, ip_address)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(&entry.action)
            .bind(&entry.username)
            .bind(&entry.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Query audit logs with filtering and pagination, newest first.
    pub async fn query(pool: &PgPool, params: &AuditQuery) -> Result<Vec<AuditLog>, sqlx::Error> {
        let limit = params.limit.unwrap_or(50).min(500);
        let offset = params.offset.unwrap_or(0);

        let (where_clause, bind_values, bind_idx) = build_filter(params);

        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs {where_clause} \
             ORDER BY timestamp DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, AuditLog>(&query);
        for value in &bind_values {
            match value {
                BindValue::Text(v) => q = q.bind(v.clone()),
                BindValue::Timestamp(v) => q = q.bind(*v),
            }
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count audit logs matching the given filter (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &AuditQuery) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_filter(params);

        let query = format!("SELECT COUNT(*)::BIGINT FROM audit_logs {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in &bind_values {
            match value {
                BindValue::Text(v) => q = q.bind(v.clone()),
                BindValue::Timestamp(v) => q = q.bind(*v),
            }
        }
        q.fetch_one(pool).await
    }

    /// Export audit log entries within a time range, oldest first.
    pub async fn export_range(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs \
             WHERE timestamp >= $1 AND timestamp <= $2 \
             ORDER BY timestamp ASC"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}

/// Build a WHERE clause and bind values from audit filter parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
fn build_filter(params: &AuditQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(ref action) = params.action {
        conditions.push(format!("action = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(action.clone()));
    }
    if let Some(ref username) = params.username {
        conditions.push(format!("username = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(username.clone()));
    }
    if let Some(from) = params.from {
        conditions.push(format!("timestamp >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(from));
    }
    if let Some(to) = params.to {
        conditions.push(format!("timestamp <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}
