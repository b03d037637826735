//! Issue models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trapline_core::types::{DbId, Timestamp};

/// A row from the `issues` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Issue {
    pub id: DbId,
    pub line_id: DbId,
    pub outing_id: Option<DbId>,
    pub issue_status: String,
    pub start_station_id: String,
    pub end_station_id: Option<String>,
    pub station_type: String,
    pub issue_type: String,
    pub origin: Option<String>,
    pub reported_by: Option<String>,
    pub description: Option<String>,
    pub photo_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new issue.
///
/// `line_id` may be omitted when `outing_id` is given; the outing's line is
/// used instead.
#[derive(Debug, Deserialize)]
pub struct CreateIssue {
    pub line_id: Option<DbId>,
    pub outing_id: Option<DbId>,
    pub issue_status: Option<String>,
    pub start_station_id: String,
    pub end_station_id: Option<String>,
    pub station_type: Option<String>,
    pub issue_type: String,
    pub origin: Option<String>,
    pub reported_by: Option<String>,
    pub description: Option<String>,
    pub photo_path: Option<String>,
}

/// DTO for updating an issue.
#[derive(Debug, Deserialize)]
pub struct UpdateIssue {
    pub issue_status: Option<String>,
    pub start_station_id: Option<String>,
    pub end_station_id: Option<String>,
    pub station_type: Option<String>,
    pub issue_type: Option<String>,
    pub origin: Option<String>,
    pub reported_by: Option<String>,
    pub description: Option<String>,
    pub photo_path: Option<String>,
}

/// Filter parameters for issue listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFilter {
    pub line_id: Option<DbId>,
    pub outing_id: Option<DbId>,
    pub issue_status: Option<String>,
    pub issue_type: Option<String>,
    pub station_type: Option<String>,
    /// Free-text search over station id and description.
    pub q: Option<String>,
}
