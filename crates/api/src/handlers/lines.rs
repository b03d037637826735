//! Handlers for the `/lines` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use trapline_core::choices::LineType;
use trapline_core::error::CoreError;
use trapline_core::station::validate_station_id;
use trapline_core::types::DbId;
use trapline_db::models::issue::{Issue, IssueFilter};
use trapline_db::models::line::{CreateLine, Line, LineWithCounts, UpdateLine};
use trapline_db::models::outing::{OutingFilter, OutingWithParticipants};
use trapline_db::repositories::{IssueRepo, LineRepo, OutingRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for the line listing.
#[derive(Debug, Deserialize)]
pub struct LineListQuery {
    /// Exact line type filter.
    pub line_type: Option<String>,
    /// Case-insensitive search over name and station ids.
    pub q: Option<String>,
}

/// GET /api/v1/lines
///
/// Lines with their outing/issue statistics, ordered by name.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LineListQuery>,
) -> AppResult<Json<Vec<LineWithCounts>>> {
    let lines = LineRepo::list(
        &state.pool,
        params.line_type.as_deref(),
        params.q.as_deref(),
    )
    .await?;
    Ok(Json(lines))
}

/// POST /api/v1/lines
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLine>,
) -> AppResult<(StatusCode, Json<Line>)> {
    validate_line_fields(
        Some(&input.name),
        Some(&input.line_type),
        Some(&input.start_station_id),
        Some(&input.end_station_id),
    )?;
    let line = LineRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// GET /api/v1/lines/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Line>> {
    let line = LineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Line", id }))?;
    Ok(Json(line))
}

/// PUT /api/v1/lines/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLine>,
) -> AppResult<Json<Line>> {
    validate_line_fields(
        input.name.as_deref(),
        input.line_type.as_deref(),
        input.start_station_id.as_deref(),
        input.end_station_id.as_deref(),
    )?;
    let line = LineRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Line", id }))?;
    Ok(Json(line))
}

/// DELETE /api/v1/lines/{id}
///
/// Cascades to the line's outings and issues.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LineRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Line", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/lines/{id}/outings
///
/// The line's outings, newest first, with participant names.
pub async fn list_outings(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<OutingWithParticipants>>> {
    ensure_line_exists(&state, id).await?;
    let filter = OutingFilter {
        line_id: Some(id),
        ..Default::default()
    };
    let outings = OutingRepo::list(&state.pool, &filter).await?;
    Ok(Json(outings))
}

/// GET /api/v1/lines/{id}/issues
pub async fn list_issues(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Issue>>> {
    ensure_line_exists(&state, id).await?;
    let filter = IssueFilter {
        line_id: Some(id),
        ..Default::default()
    };
    let issues = IssueRepo::list(&state.pool, &filter).await?;
    Ok(Json(issues))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn ensure_line_exists(state: &AppState, id: DbId) -> AppResult<()> {
    LineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Line", id }))?;
    Ok(())
}

/// Validate the fields present on a create or update payload.
fn validate_line_fields(
    name: Option<&str>,
    line_type: Option<&str>,
    start_station_id: Option<&str>,
    end_station_id: Option<&str>,
) -> AppResult<()> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Line name cannot be empty".into()));
        }
    }
    if let Some(line_type) = line_type {
        if LineType::from_str(line_type).is_none() {
            return Err(AppError::BadRequest(format!(
                "Invalid line type '{}'. Must be one of: {}",
                line_type,
                LineType::ALL.join(", ")
            )));
        }
    }
    for station in [start_station_id, end_station_id].into_iter().flatten() {
        validate_station_id(station).map_err(AppError::BadRequest)?;
    }
    Ok(())
}
