//! Team member models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trapline_core::types::{DbId, Timestamp};

/// A row from the `team_members` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TeamMember {
    pub id: DbId,
    pub name: String,
    pub email_address: Option<String>,
    pub available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new team member.
#[derive(Debug, Deserialize)]
pub struct CreateTeamMember {
    pub name: String,
    pub email_address: Option<String>,
    pub available: Option<bool>,
}

/// DTO for updating a team member.
#[derive(Debug, Deserialize)]
pub struct UpdateTeamMember {
    pub name: Option<String>,
    pub email_address: Option<String>,
    pub available: Option<bool>,
}
