//! Handlers for the `/issues` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use trapline_core::choices::{IssueStatus, IssueType, StationType};
use trapline_core::error::CoreError;
use trapline_core::station::validate_station_id;
use trapline_core::types::DbId;
use trapline_db::models::issue::{CreateIssue, Issue, IssueFilter, UpdateIssue};
use trapline_db::repositories::{IssueRepo, LineRepo, OutingRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/issues
///
/// Filterable by status, type, station type, and line; `q` searches the
/// station id and description.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<IssueFilter>,
) -> AppResult<Json<Vec<Issue>>> {
    let issues = IssueRepo::list(&state.pool, &filter).await?;
    Ok(Json(issues))
}

/// POST /api/v1/issues
///
/// The line may be omitted when an outing is given; the outing's line is
/// used instead.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateIssue>,
) -> AppResult<(StatusCode, Json<Issue>)> {
    validate_issue_fields(
        Some(&input.start_station_id),
        input.issue_status.as_deref(),
        input.station_type.as_deref(),
        Some(&input.issue_type),
    )?;

    let line_id = resolve_line_id(&state, &input).await?;
    let issue = IssueRepo::create(&state.pool, line_id, &input).await?;
    Ok((StatusCode::CREATED, Json(issue)))
}

/// GET /api/v1/issues/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Issue>> {
    let issue = IssueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Issue", id }))?;
    Ok(Json(issue))
}

/// PUT /api/v1/issues/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIssue>,
) -> AppResult<Json<Issue>> {
    validate_issue_fields(
        input.start_station_id.as_deref(),
        input.issue_status.as_deref(),
        input.station_type.as_deref(),
        input.issue_type.as_deref(),
    )?;
    let issue = IssueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Issue", id }))?;
    Ok(Json(issue))
}

/// DELETE /api/v1/issues/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = IssueRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Issue", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Resolve the line an issue belongs to: an explicit `line_id` wins, then
/// the outing's line.
async fn resolve_line_id(state: &AppState, input: &CreateIssue) -> AppResult<DbId> {
    if let Some(line_id) = input.line_id {
        LineRepo::find_by_id(&state.pool, line_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Line",
                id: line_id,
            }))?;
        return Ok(line_id);
    }

    if let Some(outing_id) = input.outing_id {
        let outing = OutingRepo::find_by_id(&state.pool, outing_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Outing",
                id: outing_id,
            }))?;
        return Ok(outing.line_id);
    }

    Err(AppError::BadRequest(
        "An issue requires a line_id or an outing_id".into(),
    ))
}

/// Validate the enum-valued and station-id fields present on a payload.
pub(crate) fn validate_issue_fields(
    start_station_id: Option<&str>,
    issue_status: Option<&str>,
    station_type: Option<&str>,
    issue_type: Option<&str>,
) -> AppResult<()> {
    if let Some(station) = start_station_id {
        validate_station_id(station).map_err(AppError::BadRequest)?;
    }
    if let Some(status) = issue_status {
        if IssueStatus::from_str(status).is_none() {
            return Err(AppError::BadRequest(format!(
                "Invalid issue status '{}'. Must be one of: {}",
                status,
                IssueStatus::ALL.join(", ")
            )));
        }
    }
    if let Some(station_type) = station_type {
        if StationType::from_str(station_type).is_none() {
            return Err(AppError::BadRequest(format!(
                "Invalid station type '{}'. Must be one of: {}",
                station_type,
                StationType::ALL.join(", ")
            )));
        }
    }
    if let Some(issue_type) = issue_type {
        if IssueType::from_str(issue_type).is_none() {
            return Err(AppError::BadRequest(format!(
                "Invalid issue type '{issue_type}'"
            )));
        }
    }
    Ok(())
}
