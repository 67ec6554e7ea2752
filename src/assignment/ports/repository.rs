//! Repository port for task persistence, lookup, and removal.

use crate::assignment::domain::{LifecycleStage, Task, TaskId, TeacherId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations persist each task as one record holding state and history
/// together, so a single `update` call keeps the two consistent.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task as one whole-aggregate write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks owned by `owner`, optionally restricted to one
    /// lifecycle stage.
    ///
    /// Stage filtering honours dominance: a soft-deleted task never appears
    /// in active or archived listings even when its archive marker is set.
    async fn find_by_owner(
        &self,
        owner: TeacherId,
        stage: Option<LifecycleStage>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the subset of `ids` that exist and are owned by `owner`.
    async fn find_owned(&self, ids: &[TaskId], owner: TeacherId)
    -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all soft-deleted tasks whose deletion timestamp is strictly
    /// older than `cutoff`.
    async fn find_deleted_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Permanently removes a task record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete_hard(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
