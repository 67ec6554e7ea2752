//! Append-only operation history for task aggregates.

use super::{ParseOperationKindError, TeacherId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle action recorded in a task's operation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Task was archived.
    Archive,
    /// Task was unarchived.
    Unarchive,
    /// Student view permission was changed while archived.
    UpdateStudentViewPermission,
    /// Task was moved to the recycle bin.
    SoftDelete,
    /// Task was restored from the recycle bin.
    Restore,
}

impl OperationKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Unarchive => "unarchive",
            Self::UpdateStudentViewPermission => "update_student_view_permission",
            Self::SoftDelete => "soft_delete",
            Self::Restore => "restore",
        }
    }
}

impl TryFrom<&str> for OperationKind {
    type Error = ParseOperationKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "archive" => Ok(Self::Archive),
            "unarchive" => Ok(Self::Unarchive),
            "update_student_view_permission" => Ok(Self::UpdateStudentViewPermission),
            "soft_delete" => Ok(Self::SoftDelete),
            "restore" => Ok(Self::Restore),
            _ => Err(ParseOperationKindError(value.to_owned())),
        }
    }
}

/// One audit entry describing a successful lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    action: OperationKind,
    performed_by: TeacherId,
    timestamp: DateTime<Utc>,
    details: String,
}

impl OperationRecord {
    /// Creates a history entry for a performed action.
    #[must_use]
    pub fn new(
        action: OperationKind,
        performed_by: TeacherId,
        timestamp: DateTime<Utc>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            action,
            performed_by,
            timestamp,
            details: details.into(),
        }
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> OperationKind {
        self.action
    }

    /// Returns the teacher that performed the action.
    #[must_use]
    pub const fn performed_by(&self) -> TeacherId {
        self.performed_by
    }

    /// Returns when the action was performed.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the human-readable detail payload.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }
}

/// Ordered, append-only sequence of [`OperationRecord`] entries.
///
/// The wrapper exposes no removal or mutation API; history length is
/// monotonically non-decreasing over an aggregate's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationHistory(Vec<OperationRecord>);

impl OperationHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Reconstructs a history from persisted records.
    #[must_use]
    pub const fn from_records(records: Vec<OperationRecord>) -> Self {
        Self(records)
    }

    /// Appends one entry.
    pub fn record(&mut self, entry: OperationRecord) {
        self.0.push(entry);
    }

    /// Returns the recorded entries in append order.
    #[must_use]
    pub fn entries(&self) -> &[OperationRecord] {
        &self.0
    }

    /// Returns the most recent entry, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&OperationRecord> {
        self.0.last()
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no entry has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
