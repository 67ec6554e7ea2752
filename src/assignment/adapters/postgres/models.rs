//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning teacher.
    pub owner: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional task category.
    pub category: Option<String>,
    /// Optional submission deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Archive timestamp.
    pub archived_at: Option<DateTime<Utc>>,
    /// Teacher that archived the task.
    pub archived_by: Option<uuid::Uuid>,
    /// Student-view permission while archived.
    pub archived_student_view: Option<bool>,
    /// Deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Teacher that soft-deleted the task.
    pub deleted_by: Option<uuid::Uuid>,
    /// Operation history JSON payload.
    pub history: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for task records.
///
/// `treat_none_as_null` makes updates clear lifecycle columns when a marker
/// has been removed (unarchive, restore).
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskWriteRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning teacher.
    pub owner: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional task category.
    pub category: Option<String>,
    /// Optional submission deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Archive timestamp.
    pub archived_at: Option<DateTime<Utc>>,
    /// Teacher that archived the task.
    pub archived_by: Option<uuid::Uuid>,
    /// Student-view permission while archived.
    pub archived_student_view: Option<bool>,
    /// Deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Teacher that soft-deleted the task.
    pub deleted_by: Option<uuid::Uuid>,
    /// Operation history JSON payload.
    pub history: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
