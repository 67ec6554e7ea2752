//! Diesel row models for roster persistence.

use super::schema::class_rosters;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for roster records.
///
/// `QueryableByName` backs the raw JSONB query used to find rosters with
/// expired removal markers.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = class_rosters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RosterRow {
    /// Class identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Owning teacher.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub owner: uuid::Uuid,
    /// Membership entries payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub entries: Value,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for roster records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = class_rosters)]
pub struct RosterWriteRow {
    /// Class identifier.
    pub id: uuid::Uuid,
    /// Owning teacher.
    pub owner: uuid::Uuid,
    /// Membership entries payload.
    pub entries: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
