//! Port to the external submission store.
//!
//! The lifecycle core never creates submissions; it only needs the cascade
//! capability so hard deletion and the retention sweep can remove a task's
//! dependent submission records before the task row itself. Leaving
//! submissions behind that reference a deleted task is a correctness defect.

use crate::assignment::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for submission store operations.
pub type SubmissionStoreResult<T> = Result<T, SubmissionStoreError>;

/// Cascade contract exposed by the submissions collaborator.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Deletes every submission referencing `task`, returning how many were
    /// removed.
    async fn delete_for_task(&self, task: TaskId) -> SubmissionStoreResult<usize>;
}

/// Errors returned by submission store implementations.
#[derive(Debug, Clone, Error)]
pub enum SubmissionStoreError {
    /// Persistence-layer failure.
    #[error("submission store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SubmissionStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
