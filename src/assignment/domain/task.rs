//! Task aggregate root and lifecycle marker types.

use super::{
    OperationHistory, OperationKind, OperationRecord, TaskDomainError, TaskId, TeacherId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Derived lifecycle stage of a task.
///
/// A task may carry an archive marker and a deletion marker simultaneously;
/// deletion is strictly dominant when deriving the stage
/// (deleted > archived > active).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleStage {
    /// Neither archived nor deleted.
    Active,
    /// Archived and not deleted.
    Archived,
    /// Soft-deleted, regardless of the archive marker.
    Deleted,
}

impl LifecycleStage {
    /// Returns the canonical display representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }
}

/// Options accepted by the archive transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Whether students may still view the task while archived.
    pub allow_student_view: bool,
}

impl ArchiveOptions {
    /// Creates archive options with an explicit student-view setting.
    #[must_use]
    pub const fn new(allow_student_view: bool) -> Self {
        Self { allow_student_view }
    }
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            allow_student_view: true,
        }
    }
}

/// Archive marker carried by an archived task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveState {
    archived_at: DateTime<Utc>,
    archived_by: TeacherId,
    allow_student_view: bool,
}

impl ArchiveState {
    /// Returns when the task was archived.
    #[must_use]
    pub const fn archived_at(&self) -> DateTime<Utc> {
        self.archived_at
    }

    /// Returns the teacher that archived the task.
    #[must_use]
    pub const fn archived_by(&self) -> TeacherId {
        self.archived_by
    }

    /// Returns whether students may view the task while archived.
    #[must_use]
    pub const fn allow_student_view(&self) -> bool {
        self.allow_student_view
    }

    /// Reconstructs an archive marker from persisted fields.
    #[must_use]
    pub const fn from_persisted(
        archived_at: DateTime<Utc>,
        archived_by: TeacherId,
        allow_student_view: bool,
    ) -> Self {
        Self {
            archived_at,
            archived_by,
            allow_student_view,
        }
    }
}

/// Deletion marker carried by a soft-deleted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionState {
    deleted_at: DateTime<Utc>,
    deleted_by: TeacherId,
}

impl DeletionState {
    /// Returns when the task was soft-deleted.
    #[must_use]
    pub const fn deleted_at(&self) -> DateTime<Utc> {
        self.deleted_at
    }

    /// Returns the teacher that soft-deleted the task.
    #[must_use]
    pub const fn deleted_by(&self) -> TeacherId {
        self.deleted_by
    }

    /// Reconstructs a deletion marker from persisted fields.
    #[must_use]
    pub const fn from_persisted(deleted_at: DateTime<Utc>, deleted_by: TeacherId) -> Self {
        Self {
            deleted_at,
            deleted_by,
        }
    }
}

/// Descriptive payload carried by a task.
///
/// The lifecycle core treats these fields as opaque; only the title is
/// validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    title: String,
    category: Option<String>,
    deadline: Option<DateTime<Utc>>,
}

impl TaskDetails {
    /// Creates validated task details.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty after
    /// trimming.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            category: None,
            deadline: None,
        })
    }

    /// Sets the task category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the task deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the task deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    owner: TeacherId,
    details: TaskDetails,
    archive: Option<ArchiveState>,
    deletion: Option<DeletionState>,
    history: OperationHistory,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identifier.
    pub owner: TeacherId,
    /// Persisted descriptive payload.
    pub details: TaskDetails,
    /// Persisted archive marker, if any.
    pub archive: Option<ArchiveState>,
    /// Persisted deletion marker, if any.
    pub deletion: Option<DeletionState>,
    /// Persisted operation history.
    pub history: OperationHistory,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new active task owned by `owner`.
    #[must_use]
    pub fn new(owner: TeacherId, details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner,
            details,
            archive: None,
            deletion: None,
            history: OperationHistory::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            details: data.details,
            archive: data.archive,
            deletion: data.deletion,
            history: data.history,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning teacher.
    #[must_use]
    pub const fn owner(&self) -> TeacherId {
        self.owner
    }

    /// Returns the descriptive payload.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the archive marker, if the task is archived.
    #[must_use]
    pub const fn archive_state(&self) -> Option<&ArchiveState> {
        self.archive.as_ref()
    }

    /// Returns the deletion marker, if the task is soft-deleted.
    #[must_use]
    pub const fn deletion_state(&self) -> Option<&DeletionState> {
        self.deletion.as_ref()
    }

    /// Returns `true` when the archive marker is set.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archive.is_some()
    }

    /// Returns `true` when the deletion marker is set.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deletion.is_some()
    }

    /// Derives the lifecycle stage, with deletion dominant over archival.
    #[must_use]
    pub const fn stage(&self) -> LifecycleStage {
        if self.deletion.is_some() {
            LifecycleStage::Deleted
        } else if self.archive.is_some() {
            LifecycleStage::Archived
        } else {
            LifecycleStage::Active
        }
    }

    /// Returns the operation history.
    #[must_use]
    pub const fn history(&self) -> &OperationHistory {
        &self.history
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Archives the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotOwner`] for non-owners,
    /// [`TaskDomainError::TaskDeleted`] when the task sits in the recycle
    /// bin, and [`TaskDomainError::AlreadyArchived`] when the archive marker
    /// is already set.
    pub fn archive(
        &mut self,
        actor: TeacherId,
        options: ArchiveOptions,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_owner(actor)?;
        if self.deletion.is_some() {
            return Err(TaskDomainError::TaskDeleted(self.id));
        }
        if self.archive.is_some() {
            return Err(TaskDomainError::AlreadyArchived(self.id));
        }

        let timestamp = clock.utc();
        self.archive = Some(ArchiveState {
            archived_at: timestamp,
            archived_by: actor,
            allow_student_view: options.allow_student_view,
        });
        let visibility = if options.allow_student_view {
            "retained"
        } else {
            "hidden"
        };
        self.record(
            OperationKind::Archive,
            actor,
            timestamp,
            format!("task archived; student view {visibility}"),
        );
        Ok(())
    }

    /// Unarchives the task, resetting the student-view permission.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotOwner`] for non-owners and
    /// [`TaskDomainError::NotArchived`] when no archive marker is set.
    pub fn unarchive(
        &mut self,
        actor: TeacherId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_owner(actor)?;
        if self.archive.is_none() {
            return Err(TaskDomainError::NotArchived(self.id));
        }

        self.archive = None;
        self.record(
            OperationKind::Unarchive,
            actor,
            clock.utc(),
            "task unarchived; student view permission reset",
        );
        Ok(())
    }

    /// Changes whether students may view the task while archived.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotOwner`] for non-owners and
    /// [`TaskDomainError::NotArchived`] when no archive marker is set.
    pub fn update_student_view_permission(
        &mut self,
        actor: TeacherId,
        allow: bool,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_owner(actor)?;
        let Some(marker) = self.archive.as_mut() else {
            return Err(TaskDomainError::NotArchived(self.id));
        };

        marker.allow_student_view = allow;
        let setting = if allow { "enabled" } else { "disabled" };
        self.record(
            OperationKind::UpdateStudentViewPermission,
            actor,
            clock.utc(),
            format!("student view while archived {setting}"),
        );
        Ok(())
    }

    /// Moves the task to the recycle bin; the archive marker is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotOwner`] for non-owners and
    /// [`TaskDomainError::AlreadyDeleted`] when the deletion marker is
    /// already set.
    pub fn soft_delete(
        &mut self,
        actor: TeacherId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_owner(actor)?;
        if self.deletion.is_some() {
            return Err(TaskDomainError::AlreadyDeleted(self.id));
        }

        let timestamp = clock.utc();
        self.deletion = Some(DeletionState {
            deleted_at: timestamp,
            deleted_by: actor,
        });
        self.record(
            OperationKind::SoftDelete,
            actor,
            timestamp,
            "task moved to recycle bin",
        );
        Ok(())
    }

    /// Restores the task from the recycle bin.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotOwner`] for non-owners and
    /// [`TaskDomainError::NotDeleted`] when no deletion marker is set.
    pub fn restore(
        &mut self,
        actor: TeacherId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_owner(actor)?;
        if self.deletion.is_none() {
            return Err(TaskDomainError::NotDeleted(self.id));
        }

        self.deletion = None;
        self.record(
            OperationKind::Restore,
            actor,
            clock.utc(),
            "task restored from recycle bin",
        );
        Ok(())
    }

    /// Authorizes permanent removal of the task.
    ///
    /// Hard deletion removes the record itself, so no history entry is
    /// appended; the caller performs the cascade and the delete.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotOwner`] for non-owners.
    pub fn authorize_hard_delete(&self, actor: TeacherId) -> Result<(), TaskDomainError> {
        self.ensure_owner(actor)
    }

    /// Appends one history entry and touches the update timestamp.
    fn record(
        &mut self,
        action: OperationKind,
        actor: TeacherId,
        timestamp: DateTime<Utc>,
        details: impl Into<String>,
    ) {
        self.history
            .record(OperationRecord::new(action, actor, timestamp, details));
        self.updated_at = timestamp;
    }

    /// Rejects any actor other than the owner, before any state check.
    fn ensure_owner(&self, actor: TeacherId) -> Result<(), TaskDomainError> {
        if self.owner != actor {
            return Err(TaskDomainError::NotOwner {
                task_id: self.id,
                actor,
            });
        }
        Ok(())
    }
}
