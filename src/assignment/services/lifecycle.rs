//! Service layer for single-task lifecycle transitions and listings.

use crate::assignment::{
    domain::{
        ArchiveOptions, DeletionState, LifecycleStage, Task, TaskDetails, TaskDomainError, TaskId,
        TeacherId,
    },
    ports::{
        SubmissionStore, SubmissionStoreError, TaskRepository, TaskRepositoryError,
    },
};
use crate::retention::RetentionWindow;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    owner: TeacherId,
    title: String,
    category: Option<String>,
    deadline: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(owner: TeacherId, title: impl Into<String>) -> Self {
        Self {
            owner,
            title: title.into(),
            category: None,
            deadline: None,
        }
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
}

/// Soft-deleted task decorated with derived retention figures.
///
/// Both figures are computed at read time and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedTaskSummary {
    /// The soft-deleted task.
    pub task: Task,
    /// Whole days remaining before the retention sweep removes the task.
    pub days_left: u32,
    /// Instant at which the task becomes eligible for permanent removal.
    pub will_be_deleted_at: DateTime<Utc>,
}

impl DeletedTaskSummary {
    fn from_task(task: Task, window: RetentionWindow, now: DateTime<Utc>) -> Option<Self> {
        let deleted_at = task.deletion_state().map(DeletionState::deleted_at)?;
        Some(Self {
            days_left: window.days_left(deleted_at, now),
            will_be_deleted_at: window.expires_at(deleted_at),
            task,
        })
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or a transition precondition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Submission cascade failed.
    #[error(transparent)]
    Submissions(#[from] SubmissionStoreError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Each transition loads the aggregate, applies the domain mutation (which
/// appends the matching history entry), and persists the whole aggregate in
/// one `update` call, so state and history never diverge.
#[derive(Clone)]
pub struct TaskLifecycleService<R, S, C>
where
    R: TaskRepository,
    S: SubmissionStore,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    submissions: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> TaskLifecycleService<R, S, C>
where
    R: TaskRepository,
    S: SubmissionStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, submissions: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            submissions,
            clock,
        }
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Creates and persists a new active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the title fails validation or the
    /// repository rejects persistence.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let mut details = TaskDetails::new(request.title)?;
        if let Some(category) = request.category {
            details = details.with_category(category);
        }
        if let Some(deadline) = request.deadline {
            details = details.with_deadline(deadline);
        }

        let task = Task::new(request.owner, details, &*self.clock);
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no task has the given
    /// ID, or repository errors.
    pub async fn get(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.find_task_or_error(task_id).await
    }

    /// Archives a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown IDs, domain
    /// errors for ownership and precondition failures, and repository
    /// errors.
    pub async fn archive(
        &self,
        task_id: TaskId,
        actor: TeacherId,
        options: ArchiveOptions,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.archive(actor, options, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Unarchives a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown IDs, domain
    /// errors for ownership and precondition failures, and repository
    /// errors.
    pub async fn unarchive(&self, task_id: TaskId, actor: TeacherId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.unarchive(actor, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Changes the student-view permission of an archived task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown IDs, domain
    /// errors for ownership and precondition failures, and repository
    /// errors.
    pub async fn update_student_view_permission(
        &self,
        task_id: TaskId,
        actor: TeacherId,
        allow: bool,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.update_student_view_permission(actor, allow, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Moves a task to the recycle bin.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown IDs, domain
    /// errors for ownership and precondition failures, and repository
    /// errors.
    pub async fn soft_delete(
        &self,
        task_id: TaskId,
        actor: TeacherId,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.soft_delete(actor, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Restores a task from the recycle bin.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown IDs, domain
    /// errors for ownership and precondition failures, and repository
    /// errors.
    pub async fn restore(&self, task_id: TaskId, actor: TeacherId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.restore(actor, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Permanently removes a task after cascading its submissions.
    ///
    /// Returns the number of submissions removed by the cascade.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown IDs,
    /// [`TaskDomainError::NotOwner`] for non-owners, and repository or
    /// submission store errors.
    pub async fn hard_delete(
        &self,
        task_id: TaskId,
        actor: TeacherId,
    ) -> TaskLifecycleResult<usize> {
        let task = self.find_task_or_error(task_id).await?;
        task.authorize_hard_delete(actor)?;
        let submissions_deleted = self.submissions.delete_for_task(task_id).await?;
        self.repository.delete_hard(task_id).await?;
        Ok(submissions_deleted)
    }

    /// Lists tasks owned by `owner`, optionally restricted to one stage.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_for_owner(
        &self,
        owner: TeacherId,
        stage: Option<LifecycleStage>,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_owner(owner, stage).await?)
    }

    /// Lists soft-deleted tasks owned by `owner` with derived retention
    /// figures.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_deleted(
        &self,
        owner: TeacherId,
        window: RetentionWindow,
    ) -> TaskLifecycleResult<Vec<DeletedTaskSummary>> {
        let now = self.clock.utc();
        let deleted = self
            .repository
            .find_by_owner(owner, Some(LifecycleStage::Deleted))
            .await?;
        Ok(deleted
            .into_iter()
            .filter_map(|task| DeletedTaskSummary::from_task(task, window, now))
            .collect())
    }
}
