pub mod admin;
pub mod audit;
pub mod auth;
pub mod health;
pub mod issues;
pub mod lines;
pub mod outings;
pub mod report;
pub mod team_members;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                         login (public)
/// /auth/refresh                       refresh (public)
/// /auth/logout                        logout (requires auth)
///
/// /admin/users                        list, create (admin only)
///
/// /admin/audit-logs                   filtered listing (admin only)
/// /admin/audit-logs/export            CSV/JSON export (admin only)
///
/// /lines                              list (?line_type, ?q), create
/// /lines/export                       CSV export
/// /lines/{id}                         get, update, delete
/// /lines/{id}/outings                 the line's outings
/// /lines/{id}/issues                  the line's issues
///
/// /team-members                       list (?q), create
/// /team-members/export                CSV export
/// /team-members/{id}                  get, update, delete
///
/// /outings                            list (?line_id, ?date, ?completion_status), create
/// /outings/export                     CSV export
/// /outings/{id}                       get, update, delete
/// /outings/{id}/issues                create issue found on this outing
///
/// /issues                             list (?issue_status, ?issue_type, ?station_type,
///                                           ?line_id, ?q), create
/// /issues/export                      CSV export
/// /issues/{id}                        get, update, delete
///
/// /report                             completion report (?sort, ?order, ?format=csv)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Admin user management.
        .nest("/admin/users", admin::router())
        // Audit log listing and export (admin only, read-only).
        .nest("/admin/audit-logs", audit::router())
        // Line CRUD with nested outing/issue listings.
        .nest("/lines", lines::router())
        // Team member CRUD.
        .nest("/team-members", team_members::router())
        // Outing CRUD with inline issue creation.
        .nest("/outings", outings::router())
        // Issue CRUD.
        .nest("/issues", issues::router())
        // Line completion report.
        .nest("/report", report::router())
}
