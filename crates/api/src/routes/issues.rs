//! Route definitions for the `/issues` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{export, issues};
use crate::state::AppState;

/// Routes mounted at `/issues`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(issues::list).post(issues::create))
        .route("/export", get(export::issues))
        .route(
            "/{id}",
            get(issues::get_by_id)
                .put(issues::update)
                .delete(issues::delete),
        )
}
