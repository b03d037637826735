//! Route definitions for the completion report.

use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/report`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(report::completion_report))
}
