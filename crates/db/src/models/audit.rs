//! Audit log models and DTOs.
//!
//! Audit rows record authentication outcomes and are append-only: there is
//! no update DTO and no mutating repository method.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trapline_core::types::{DbId, Timestamp};

/// A single audit log entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub action: String,
    pub username: Option<String>,
    pub ip_address: Option<String>,
    pub timestamp: Timestamp,
}

/// DTO for appending an audit log entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuditLog {
    pub action: String,
    pub username: Option<String>,
    pub ip_address: Option<String>,
}

/// Filter parameters for querying audit logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub action: Option<String>,
    pub username: Option<String>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Paginated response for audit log queries.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogPage {
    pub items: Vec<AuditLog>,
    pub total: i64,
}
