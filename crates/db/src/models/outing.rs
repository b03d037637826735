//! Outing models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trapline_core::types::{Date, DbId, Timestamp};

/// A row from the `outings` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Outing {
    pub id: DbId,
    pub line_id: DbId,
    pub date: Date,
    pub completion_status: String,
    pub start_station_id: Option<String>,
    pub end_station_id: Option<String>,
    pub hours: f64,
    pub number_of_workers: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An outing with its participant names, as returned by listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OutingWithParticipants {
    pub id: DbId,
    pub line_id: DbId,
    pub date: Date,
    pub completion_status: String,
    pub start_station_id: Option<String>,
    pub end_station_id: Option<String>,
    pub hours: f64,
    pub number_of_workers: f64,
    pub participants: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new outing.
#[derive(Debug, Deserialize)]
pub struct CreateOuting {
    pub line_id: DbId,
    pub date: Date,
    pub completion_status: Option<String>,
    pub start_station_id: Option<String>,
    pub end_station_id: Option<String>,
    pub hours: Option<f64>,
    pub number_of_workers: Option<f64>,
    pub participant_ids: Option<Vec<DbId>>,
}

/// DTO for updating an outing.
///
/// `participant_ids`, when present, replaces the whole participant set.
#[derive(Debug, Deserialize)]
pub struct UpdateOuting {
    pub date: Option<Date>,
    pub completion_status: Option<String>,
    pub start_station_id: Option<String>,
    pub end_station_id: Option<String>,
    pub hours: Option<f64>,
    pub number_of_workers: Option<f64>,
    pub participant_ids: Option<Vec<DbId>>,
}

/// Filter parameters for outing listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutingFilter {
    pub line_id: Option<DbId>,
    pub date: Option<Date>,
    pub completion_status: Option<String>,
}
