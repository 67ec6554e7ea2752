//! In-memory submission store for cascade tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::assignment::{
    domain::TaskId,
    ports::{SubmissionStore, SubmissionStoreError, SubmissionStoreResult},
};

/// Thread-safe in-memory submission store.
///
/// Tests seed submissions with [`InMemorySubmissionStore::record`] and assert
/// cascade behaviour with [`InMemorySubmissionStore::count_for_task`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionStore {
    state: Arc<RwLock<HashMap<TaskId, Vec<Value>>>>,
}

impl InMemorySubmissionStore {
    /// Creates an empty in-memory submission store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one submission payload for `task`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionStoreError::Persistence`] when the store lock is
    /// poisoned.
    pub fn record(&self, task: TaskId, payload: Value) -> SubmissionStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SubmissionStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.entry(task).or_default().push(payload);
        Ok(())
    }

    /// Returns how many submissions reference `task`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionStoreError::Persistence`] when the store lock is
    /// poisoned.
    pub fn count_for_task(&self, task: TaskId) -> SubmissionStoreResult<usize> {
        let state = self.state.read().map_err(|err| {
            SubmissionStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&task).map_or(0, Vec::len))
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn delete_for_task(&self, task: TaskId) -> SubmissionStoreResult<usize> {
        let mut state = self.state.write().map_err(|err| {
            SubmissionStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.remove(&task).map_or(0, |removed| removed.len()))
    }
}
