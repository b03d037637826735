//! Handlers for admin user management.
//!
//! All endpoints require admin role.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use trapline_db::models::user::{CreateUser, User};
use trapline_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, ROLE_ADMIN, ROLE_MEMBER};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub role: Option<String>,
}

/// GET /admin/users
///
/// List all user accounts. Admin only.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /admin/users
///
/// Create a user account. Admin only.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    if input.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username cannot be empty".into()));
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let role = input.role.as_deref().unwrap_or(ROLE_MEMBER);
    if role != ROLE_ADMIN && role != ROLE_MEMBER {
        return Err(AppError::BadRequest(format!(
            "Invalid role '{role}'. Must be '{ROLE_ADMIN}' or '{ROLE_MEMBER}'"
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role: role.to_string(),
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        username = %user.username,
        created_by = admin.user_id,
        "User account created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}
