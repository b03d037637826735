//! Per-entity CSV export endpoints.
//!
//! Each export returns the full table as a CSV attachment, ordered the way
//! the corresponding listing is ordered.

use axum::body::Body;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use trapline_db::models::issue::IssueFilter;
use trapline_db::models::outing::OutingFilter;
use trapline_db::repositories::{IssueRepo, LineRepo, OutingRepo, TeamMemberRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Build a `text/csv` attachment response.
pub(crate) fn csv_attachment(filename: &str, body: String) -> Response {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/csv")
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(body))
        .expect("valid response")
        .into_response()
}

fn render<F>(write_rows: F) -> AppResult<String>
where
    F: FnOnce(&mut csv::Writer<Vec<u8>>) -> Result<(), csv::Error>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_rows(&mut writer).map_err(|e| AppError::InternalError(format!("CSV error: {e}")))?;
    let bytes = writer
        .into_inner()
        .expect("flushing to an in-memory buffer cannot fail");
    String::from_utf8(bytes).map_err(|e| AppError::InternalError(format!("CSV error: {e}")))
}

/// GET /api/v1/lines/export
pub async fn lines(_auth: AuthUser, State(state): State<AppState>) -> AppResult<Response> {
    let rows = LineRepo::list_all(&state.pool).await?;
    let csv = render(|w| {
        w.write_record(["id", "name", "line_type", "start_station_id", "end_station_id"])?;
        for line in &rows {
            w.write_record(&[
                line.id.to_string(),
                line.name.clone(),
                line.line_type.clone(),
                line.start_station_id.clone(),
                line.end_station_id.clone(),
            ])?;
        }
        Ok(())
    })?;
    Ok(csv_attachment("lines.csv", csv))
}

/// GET /api/v1/team-members/export
pub async fn team_members(_auth: AuthUser, State(state): State<AppState>) -> AppResult<Response> {
    let rows = TeamMemberRepo::list(&state.pool, None).await?;
    let csv = render(|w| {
        w.write_record(["id", "name", "email_address", "available"])?;
        for member in &rows {
            w.write_record(&[
                member.id.to_string(),
                member.name.clone(),
                member.email_address.clone().unwrap_or_default(),
                member.available.to_string(),
            ])?;
        }
        Ok(())
    })?;
    Ok(csv_attachment("team-members.csv", csv))
}

/// GET /api/v1/outings/export
pub async fn outings(_auth: AuthUser, State(state): State<AppState>) -> AppResult<Response> {
    let rows = OutingRepo::list(&state.pool, &OutingFilter::default()).await?;
    let csv = render(|w| {
        w.write_record([
            "id",
            "line_id",
            "date",
            "completion_status",
            "start_station_id",
            "end_station_id",
            "hours",
            "number_of_workers",
            "participants",
        ])?;
        for outing in &rows {
            w.write_record(&[
                outing.id.to_string(),
                outing.line_id.to_string(),
                outing.date.to_string(),
                outing.completion_status.clone(),
                outing.start_station_id.clone().unwrap_or_default(),
                outing.end_station_id.clone().unwrap_or_default(),
                outing.hours.to_string(),
                outing.number_of_workers.to_string(),
                outing.participants.join("; "),
            ])?;
        }
        Ok(())
    })?;
    Ok(csv_attachment("outings.csv", csv))
}

/// GET /api/v1/issues/export
pub async fn issues(_auth: AuthUser, State(state): State<AppState>) -> AppResult<Response> {
    let rows = IssueRepo::list(&state.pool, &IssueFilter::default()).await?;
    let csv = render(|w| {
        w.write_record([
            "id",
            "line_id",
            "outing_id",
            "issue_status",
            "start_station_id",
            "end_station_id",
            "station_type",
            "issue_type",
            "origin",
            "reported_by",
            "description",
        ])?;
        for issue in &rows {
            w.write_record(&[
                issue.id.to_string(),
                issue.line_id.to_string(),
                issue.outing_id.map(|id| id.to_string()).unwrap_or_default(),
                issue.issue_status.clone(),
                issue.start_station_id.clone(),
                issue.end_station_id.clone().unwrap_or_default(),
                issue.station_type.clone(),
                issue.issue_type.clone(),
                issue.origin.clone().unwrap_or_default(),
                issue.reported_by.clone().unwrap_or_default(),
                issue.description.clone().unwrap_or_default(),
            ])?;
        }
        Ok(())
    })?;
    Ok(csv_attachment("issues.csv", csv))
}
