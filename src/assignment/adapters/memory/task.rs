//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::assignment::{
    domain::{DeletionState, LifecycleStage, Task, TaskId, TeacherId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(
        &self,
    ) -> TaskRepositoryResult<std::sync::RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(
        &self,
    ) -> TaskRepositoryResult<std::sync::RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        let task_id = task.id();
        if state.contains_key(&task_id) {
            return Err(TaskRepositoryError::DuplicateTask(task_id));
        }
        state.insert(task_id, task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        let task_id = task.id();
        if !state.contains_key(&task_id) {
            return Err(TaskRepositoryError::NotFound(task_id));
        }
        state.insert(task_id, task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.get(&id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner: TeacherId,
        stage: Option<LifecycleStage>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        let mut tasks: Vec<Task> = state
            .values()
            .filter(|task| task.owner() == owner)
            .filter(|task| stage.is_none_or(|wanted| task.stage() == wanted))
            .cloned()
            .collect();
        tasks.sort_by_key(Task::created_at);
        Ok(tasks)
    }

    async fn find_owned(
        &self,
        ids: &[TaskId],
        owner: TeacherId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        // Each stored task appears at most once, so a duplicated requested
        // id cannot inflate the count the batch ownership gate compares.
        Ok(state
            .values()
            .filter(|task| ids.contains(&task.id()))
            .filter(|task| task.owner() == owner)
            .cloned()
            .collect())
    }

    async fn find_deleted_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state
            .values()
            .filter(|task| {
                task.deletion_state()
                    .map(DeletionState::deleted_at)
                    .is_some_and(|deleted_at| deleted_at < cutoff)
            })
            .cloned()
            .collect())
    }

    async fn delete_hard(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
