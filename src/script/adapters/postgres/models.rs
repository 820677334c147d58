//! Diesel row models for script persistence.

use super::schema::scripts;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for script records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = scripts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ScriptRow {
    /// Script identifier.
    pub id: uuid::Uuid,
    /// Owning process identifier.
    pub process_id: uuid::Uuid,
    /// Unique script title.
    pub title: String,
    /// Script description.
    pub description: String,
    /// Language tag.
    pub language: String,
    /// Source code body.
    pub code: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for script records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = scripts)]
pub struct NewScriptRow {
    /// Script identifier.
    pub id: uuid::Uuid,
    /// Owning process identifier.
    pub process_id: uuid::Uuid,
    /// Unique script title.
    pub title: String,
    /// Script description.
    pub description: String,
    /// Language tag.
    pub language: String,
    /// Source code body.
    pub code: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when a script is updated.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = scripts)]
pub struct ScriptChangesetRow {
    /// New title.
    pub title: String,
    /// New description.
    pub description: String,
    /// New language tag.
    pub language: String,
    /// New source code body.
    pub code: String,
    /// New update timestamp.
    pub updated_at: DateTime<Utc>,
}
