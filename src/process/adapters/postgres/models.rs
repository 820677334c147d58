//! Diesel row models for process persistence.

use super::schema::processes;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for process records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = processes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProcessRow {
    /// Process identifier.
    pub id: uuid::Uuid,
    /// Unique process name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for process records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = processes)]
pub struct NewProcessRow {
    /// Process identifier.
    pub id: uuid::Uuid,
    /// Unique process name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
