//! Handlers for the line completion report.
//!
//! Read-only aggregation over the current database state, recomputed in
//! full per request. Sorting happens in-memory over the aggregated rows;
//! an unrecognized sort field leaves the natural order (line name
//! ascending) unchanged.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use trapline_core::report::{render_csv, sort_rows, SortDirection, SortField};
use trapline_db::repositories::ReportRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::export::csv_attachment;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the completion report.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Sort field; defaults to `last_completed`.
    pub sort: Option<String>,
    /// Sort direction; defaults to `desc`.
    pub order: Option<String>,
    /// `csv` switches the response to an attachment download.
    pub format: Option<String>,
}

/// GET /api/v1/report?sort=X&order=asc|desc&format=csv
pub async fn completion_report(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> AppResult<Response> {
    let mut rows = ReportRepo::completion_rows(&state.pool).await?;

    let sort = params.sort.as_deref().unwrap_or("last_completed");
    let order = params.order.as_deref().unwrap_or("desc");

    if let Some(field) = SortField::from_str(sort) {
        sort_rows(&mut rows, field, SortDirection::from_str(order));
    }

    if params.format.as_deref() == Some("csv") {
        let csv = render_csv(&rows)
            .map_err(|e| AppError::InternalError(format!("CSV rendering failed: {e}")))?;
        return Ok(csv_attachment("completion-report.csv", csv));
    }

    Ok(Json(DataResponse { data: rows }).into_response())
}
