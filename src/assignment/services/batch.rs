//! Batch application of one lifecycle operation to many tasks.

use crate::assignment::{
    domain::{ArchiveOptions, TaskId, TeacherId},
    ports::{SubmissionStore, TaskRepository, TaskRepositoryError},
    services::{TaskLifecycleError, TaskLifecycleService},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Lifecycle operation applicable to a batch of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    /// Archive each task with the given options.
    Archive(ArchiveOptions),
    /// Unarchive each task.
    Unarchive,
    /// Move each task to the recycle bin.
    SoftDelete,
    /// Restore each task from the recycle bin.
    Restore,
    /// Permanently remove each task and its submissions.
    HardDelete,
}

impl BatchOperation {
    /// Returns the canonical display representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Archive(_) => "archive",
            Self::Unarchive => "unarchive",
            Self::SoftDelete => "soft_delete",
            Self::Restore => "restore",
            Self::HardDelete => "hard_delete",
        }
    }
}

/// Per-task outcome of a batch application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItemOutcome {
    /// Task the operation was attempted on.
    pub task_id: TaskId,
    /// Whether the operation succeeded for this task.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
}

impl BatchItemOutcome {
    fn succeeded(task_id: TaskId, message: impl Into<String>) -> Self {
        Self {
            task_id,
            success: true,
            message: message.into(),
        }
    }

    fn failed(task_id: TaskId, message: impl Into<String>) -> Self {
        Self {
            task_id,
            success: false,
            message: message.into(),
        }
    }
}

/// Aggregate outcome of a batch application.
///
/// A batch in which every item failed is still an `Ok` outcome; callers
/// inspect `results` for per-item failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Number of tasks the operation succeeded on.
    pub success_count: usize,
    /// Number of tasks requested.
    pub total_count: usize,
    /// One entry per requested task, in request order.
    pub results: Vec<BatchItemOutcome>,
}

/// Errors aborting a whole batch before any task is touched.
#[derive(Debug, Error)]
pub enum TaskBatchError {
    /// Some requested tasks do not exist or are not owned by the actor.
    #[error("actor owns {owned} of {requested} requested tasks")]
    Forbidden {
        /// Number of task IDs requested.
        requested: usize,
        /// Number of requested tasks found under the actor's ownership.
        owned: usize,
    },
    /// The ownership-gate query failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for batch service operations.
pub type TaskBatchResult<T> = Result<T, TaskBatchError>;

/// Applies one lifecycle operation to many tasks with per-item isolation.
#[derive(Clone)]
pub struct TaskBatchService<R, S, C>
where
    R: TaskRepository,
    S: SubmissionStore,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    lifecycle: TaskLifecycleService<R, S, C>,
}

impl<R, S, C> TaskBatchService<R, S, C>
where
    R: TaskRepository,
    S: SubmissionStore,
    C: Clock + Send + Sync,
{
    /// Creates a new batch service over the given collaborators.
    #[must_use]
    pub fn new(repository: Arc<R>, submissions: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            lifecycle: TaskLifecycleService::new(Arc::clone(&repository), submissions, clock),
            repository,
        }
    }

    /// Applies `operation` to every task in `task_ids`.
    ///
    /// Ownership is an all-or-nothing gate checked up front: when fewer
    /// owned tasks come back than IDs were requested, the whole batch fails
    /// before any task is touched, and a non-owner learns nothing about the
    /// tasks' states. Past the gate, failures are isolated per item; one
    /// task's precondition failure never aborts the rest.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBatchError::Forbidden`] when the ownership gate fails
    /// and repository errors when the gate query itself fails.
    pub async fn batch_apply(
        &self,
        task_ids: &[TaskId],
        operation: BatchOperation,
        actor: TeacherId,
    ) -> TaskBatchResult<BatchOutcome> {
        let owned = self.repository.find_owned(task_ids, actor).await?;
        if owned.len() < task_ids.len() {
            return Err(TaskBatchError::Forbidden {
                requested: task_ids.len(),
                owned: owned.len(),
            });
        }

        let mut results = Vec::with_capacity(task_ids.len());
        let mut success_count = 0;
        for task_id in task_ids {
            match self.apply_one(*task_id, operation, actor).await {
                Ok(message) => {
                    success_count += 1;
                    results.push(BatchItemOutcome::succeeded(*task_id, message));
                }
                Err(err) => {
                    tracing::debug!(
                        task = %task_id,
                        operation = operation.as_str(),
                        error = %err,
                        "batch item failed"
                    );
                    results.push(BatchItemOutcome::failed(*task_id, err.to_string()));
                }
            }
        }

        Ok(BatchOutcome {
            success_count,
            total_count: task_ids.len(),
            results,
        })
    }

    async fn apply_one(
        &self,
        task_id: TaskId,
        operation: BatchOperation,
        actor: TeacherId,
    ) -> Result<&'static str, TaskLifecycleError> {
        match operation {
            BatchOperation::Archive(options) => {
                self.lifecycle.archive(task_id, actor, options).await?;
                Ok("archived")
            }
            BatchOperation::Unarchive => {
                self.lifecycle.unarchive(task_id, actor).await?;
                Ok("unarchived")
            }
            BatchOperation::SoftDelete => {
                self.lifecycle.soft_delete(task_id, actor).await?;
                Ok("moved to recycle bin")
            }
            BatchOperation::Restore => {
                self.lifecycle.restore(task_id, actor).await?;
                Ok("restored")
            }
            BatchOperation::HardDelete => {
                self.lifecycle.hard_delete(task_id, actor).await?;
                Ok("permanently deleted")
            }
        }
    }
}
