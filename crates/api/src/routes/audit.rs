//! Route definitions for the audit log.
//!
//! Deliberately read-only: audit rows are append-only and only the
//! authentication handlers write them.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Routes mounted at `/admin/audit-logs`. Admin only.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(audit::query_audit_logs))
        .route("/export", get(audit::export_audit_logs))
}
