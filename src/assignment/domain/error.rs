//! Error types for assignment domain validation and transitions.

use super::{TaskId, TeacherId};
use thiserror::Error;

/// Errors returned while validating or transitioning task aggregates.
///
/// The ownership check runs before every state-precondition check, so a
/// non-owner always observes [`TaskDomainError::NotOwner`] and can never
/// probe a task's lifecycle state through differentiated errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The acting teacher does not own the task.
    #[error("teacher {actor} does not own task {task_id}")]
    NotOwner {
        /// Task whose mutation was refused.
        task_id: TaskId,
        /// Teacher that attempted the mutation.
        actor: TeacherId,
    },

    /// The task is already archived.
    #[error("task {0} is already archived")]
    AlreadyArchived(TaskId),

    /// The operation requires an archived task.
    #[error("task {0} is not archived")]
    NotArchived(TaskId),

    /// The task sits in the recycle bin and cannot be archived.
    #[error("task {0} has been deleted")]
    TaskDeleted(TaskId),

    /// The task is already soft-deleted.
    #[error("task {0} is already deleted")]
    AlreadyDeleted(TaskId),

    /// The operation requires a soft-deleted task.
    #[error("task {0} is not deleted")]
    NotDeleted(TaskId),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,
}

/// Error returned while parsing history actions from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown lifecycle action: {0}")]
pub struct ParseOperationKindError(pub String);
