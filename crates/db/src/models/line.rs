//! Line (transect) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trapline_core::types::{DbId, Timestamp};

/// A row from the `lines` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Line {
    pub id: DbId,
    pub name: String,
    pub line_type: String,
    pub start_station_id: String,
    pub end_station_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A line with per-line listing statistics (outings, completed outings,
/// issues), as shown in the admin listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LineWithCounts {
    pub id: DbId,
    pub name: String,
    pub line_type: String,
    pub start_station_id: String,
    pub end_station_id: String,
    pub outing_count: i64,
    pub completed_outings_count: i64,
    pub issue_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new line.
#[derive(Debug, Deserialize)]
pub struct CreateLine {
    pub name: String,
    pub line_type: String,
    pub start_station_id: String,
    pub end_station_id: String,
}

/// DTO for updating a line.
#[derive(Debug, Deserialize)]
pub struct UpdateLine {
    pub name: Option<String>,
    pub line_type: Option<String>,
    pub start_station_id: Option<String>,
    pub end_station_id: Option<String>,
}
