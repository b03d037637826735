//! Handlers for the `/team-members` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use trapline_core::error::CoreError;
use trapline_core::types::DbId;
use trapline_db::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};
use trapline_db::repositories::TeamMemberRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for the team member listing.
#[derive(Debug, Deserialize)]
pub struct TeamMemberListQuery {
    /// Case-insensitive search over name and email address.
    pub q: Option<String>,
}

/// GET /api/v1/team-members
///
/// Available members first, then by name.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TeamMemberListQuery>,
) -> AppResult<Json<Vec<TeamMember>>> {
    let members = TeamMemberRepo::list(&state.pool, params.q.as_deref()).await?;
    Ok(Json(members))
}

/// POST /api/v1/team-members
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTeamMember>,
) -> AppResult<(StatusCode, Json<TeamMember>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty".into()));
    }
    let member = TeamMemberRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /api/v1/team-members/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TeamMember>> {
    let member = TeamMemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TeamMember",
            id,
        }))?;
    Ok(Json(member))
}

/// PUT /api/v1/team-members/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeamMember>,
) -> AppResult<Json<TeamMember>> {
    if let Some(ref name) = input.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Name cannot be empty".into()));
        }
    }
    let member = TeamMemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TeamMember",
            id,
        }))?;
    Ok(Json(member))
}

/// DELETE /api/v1/team-members/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TeamMemberRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TeamMember",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
