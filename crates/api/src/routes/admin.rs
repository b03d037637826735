//! Route definitions for admin user management.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin/users`. Admin only.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(admin::list_users).post(admin::create_user))
}
