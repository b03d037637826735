//! Route definitions for the `/lines` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{export, lines};
use crate::state::AppState;

/// Routes mounted at `/lines`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lines::list).post(lines::create))
        .route("/export", get(export::lines))
        .route(
            "/{id}",
            get(lines::get_by_id)
                .put(lines::update)
                .delete(lines::delete),
        )
        .route("/{id}/outings", get(lines::list_outings))
        .route("/{id}/issues", get(lines::list_issues))
}
