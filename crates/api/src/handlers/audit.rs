//! Handlers for audit log endpoints.
//!
//! All endpoints require admin role. Audit rows are immutable: there are no
//! create/update/delete handlers here; rows are appended only by the
//! authentication handlers.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use trapline_db::models::audit::{AuditLogPage, AuditQuery};
use trapline_db::repositories::AuditLogRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::export::csv_attachment;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query parameter types
// ---------------------------------------------------------------------------

/// Query parameters for audit log queries.
#[derive(Debug, Deserialize)]
pub struct AuditLogQueryParams {
    pub action: Option<String>,
    pub username: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for audit log export.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub format: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an optional ISO 8601 date string, with a fallback.
fn parse_timestamp(
    s: &Option<String>,
    fallback: chrono::DateTime<chrono::Utc>,
) -> AppResult<chrono::DateTime<chrono::Utc>> {
    match s {
        Some(v) => v
            .parse::<chrono::DateTime<chrono::Utc>>()
            .map_err(|_| AppError::BadRequest("Invalid date format".into())),
        None => Ok(fallback),
    }
}

// ---------------------------------------------------------------------------
// Query audit logs
// ---------------------------------------------------------------------------

/// GET /admin/audit-logs
///
/// Query audit logs with filters and pagination. Admin only.
pub async fn query_audit_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AuditLogQueryParams>,
) -> AppResult<impl IntoResponse> {
    let from = if params.from.is_some() {
        Some(parse_timestamp(&params.from, chrono::Utc::now())?)
    } else {
        None
    };

    let to = if params.to.is_some() {
        Some(parse_timestamp(&params.to, chrono::Utc::now())?)
    } else {
        None
    };

    let query = AuditQuery {
        action: params.action,
        username: params.username,
        from,
        to,
        limit: params.limit,
        offset: params.offset,
    };

    let logs = AuditLogRepo::query(&state.pool, &query).await?;
    let total = AuditLogRepo::count(&state.pool, &query).await?;

    Ok(Json(DataResponse {
        data: AuditLogPage { items: logs, total },
    }))
}

// ---------------------------------------------------------------------------
// Export audit logs
// ---------------------------------------------------------------------------

/// GET /admin/audit-logs/export?format=csv|json&from=X&to=Y
///
/// Export audit logs for a date range. Admin only.
pub async fn export_audit_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ExportParams>,
) -> AppResult<Response> {
    let from = parse_timestamp(
        &params.from,
        chrono::Utc::now() - chrono::Duration::days(30),
    )?;
    let to = parse_timestamp(&params.to, chrono::Utc::now())?;

    let logs = AuditLogRepo::export_range(&state.pool, from, to).await?;

    let format = params.format.as_deref().unwrap_or("json");

    match format {
        "csv" => {
            // Build CSV output.
            let mut csv_output = String::from("id,timestamp,action,username,ip_address\n");
            for log in &logs {
                csv_output.push_str(&format!(
                    "{},{},{},{},{}\n",
                    log.id,
                    log.timestamp.to_rfc3339(),
                    log.action,
                    log.username.as_deref().unwrap_or(""),
                    log.ip_address.as_deref().unwrap_or(""),
                ));
            }

            Ok(csv_attachment("audit-logs.csv", csv_output))
        }
        _ => {
            // Default: JSON export.
            Ok(Json(DataResponse { data: logs }).into_response())
        }
    }
}
