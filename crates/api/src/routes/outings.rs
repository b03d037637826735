//! Route definitions for the `/outings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{export, outings};
use crate::state::AppState;

/// Routes mounted at `/outings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(outings::list).post(outings::create))
        .route("/export", get(export::outings))
        .route(
            "/{id}",
            get(outings::get_by_id)
                .put(outings::update)
                .delete(outings::delete),
        )
        .route("/{id}/issues", post(outings::create_issue))
}
