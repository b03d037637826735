//! Handlers for the `/outings` resource.
//!
//! An outing's station sub-range must lie within its line's range; this is
//! checked whenever the ids involved parse numerically.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use trapline_core::choices::CompletionStatus;
use trapline_core::error::CoreError;
use trapline_core::station::{sub_range_within, validate_station_id};
use trapline_core::types::DbId;
use trapline_db::models::issue::{CreateIssue, Issue};
use trapline_db::models::line::Line;
use trapline_db::models::outing::{
    CreateOuting, OutingFilter, OutingWithParticipants, UpdateOuting,
};
use trapline_db::repositories::{IssueRepo, LineRepo, OutingRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::issues::validate_issue_fields;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/outings
///
/// Filterable by `line_id`, `date`, and `completion_status`; newest first.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<OutingFilter>,
) -> AppResult<Json<Vec<OutingWithParticipants>>> {
    let outings = OutingRepo::list(&state.pool, &filter).await?;
    Ok(Json(outings))
}

/// POST /api/v1/outings
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateOuting>,
) -> AppResult<(StatusCode, Json<OutingWithParticipants>)> {
    let line = find_line(&state, input.line_id).await?;

    validate_status(input.completion_status.as_deref())?;
    validate_sub_range(
        &line,
        input.start_station_id.as_deref(),
        input.end_station_id.as_deref(),
    )?;
    validate_amounts(input.hours, input.number_of_workers)?;

    let outing = OutingRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(outing)))
}

/// GET /api/v1/outings/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OutingWithParticipants>> {
    let outing = OutingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Outing",
            id,
        }))?;
    Ok(Json(outing))
}

/// PUT /api/v1/outings/{id}
///
/// A present `participant_ids` replaces the whole participant set.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOuting>,
) -> AppResult<Json<OutingWithParticipants>> {
    let existing = OutingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Outing",
            id,
        }))?;
    let line = find_line(&state, existing.line_id).await?;

    validate_status(input.completion_status.as_deref())?;
    // Check the sub-range the outing will end up with after the update.
    let start = input
        .start_station_id
        .as_deref()
        .or(existing.start_station_id.as_deref());
    let end = input
        .end_station_id
        .as_deref()
        .or(existing.end_station_id.as_deref());
    validate_sub_range(&line, start, end)?;
    validate_amounts(input.hours, input.number_of_workers)?;

    let outing = OutingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Outing",
            id,
        }))?;
    Ok(Json(outing))
}

/// DELETE /api/v1/outings/{id}
///
/// Cascades to the outing's issues and participant links.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = OutingRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Outing",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/outings/{id}/issues
///
/// Create an issue found during this outing. When the payload omits the
/// line, the outing's line is used.
pub async fn create_issue(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<CreateIssue>,
) -> AppResult<(StatusCode, Json<Issue>)> {
    let outing = OutingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Outing",
            id,
        }))?;

    input.outing_id = Some(outing.id);
    let line_id = input.line_id.unwrap_or(outing.line_id);

    validate_issue_fields(
        Some(&input.start_station_id),
        input.issue_status.as_deref(),
        input.station_type.as_deref(),
        Some(&input.issue_type),
    )?;

    let issue = IssueRepo::create(&state.pool, line_id, &input).await?;
    Ok((StatusCode::CREATED, Json(issue)))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn find_line(state: &AppState, line_id: DbId) -> AppResult<Line> {
    LineRepo::find_by_id(&state.pool, line_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Line",
            id: line_id,
        }))
}

fn validate_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        if CompletionStatus::from_str(status).is_none() {
            return Err(AppError::BadRequest(format!(
                "Invalid completion status '{}'. Must be one of: {}",
                status,
                CompletionStatus::ALL.join(", ")
            )));
        }
    }
    Ok(())
}

fn validate_sub_range(line: &Line, start: Option<&str>, end: Option<&str>) -> AppResult<()> {
    for station in [start, end].into_iter().flatten() {
        validate_station_id(station).map_err(AppError::BadRequest)?;
    }
    sub_range_within(&line.start_station_id, &line.end_station_id, start, end)
        .map_err(|reason| AppError::Core(CoreError::Validation(reason)))
}

fn validate_amounts(hours: Option<f64>, workers: Option<f64>) -> AppResult<()> {
    if let Some(hours) = hours {
        if hours < 0.0 {
            return Err(AppError::BadRequest("Hours cannot be negative".into()));
        }
    }
    if let Some(workers) = workers {
        if workers < 0.0 {
            return Err(AppError::BadRequest(
                "Number of workers cannot be negative".into(),
            ));
        }
    }
    Ok(())
}
