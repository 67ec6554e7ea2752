//! `PostgreSQL` submission store implementation for cascade deletion.

use super::{repository::TaskPgPool, schema::submissions};
use crate::assignment::{
    domain::TaskId,
    ports::{SubmissionStore, SubmissionStoreError, SubmissionStoreResult},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed submission store.
#[derive(Debug, Clone)]
pub struct PostgresSubmissionStore {
    pool: TaskPgPool,
}

impl PostgresSubmissionStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PostgresSubmissionStore {
    async fn delete_for_task(&self, task: TaskId) -> SubmissionStoreResult<usize> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SubmissionStoreError::persistence)?;
            diesel::delete(submissions::table.filter(submissions::task_id.eq(task.into_inner())))
                .execute(&mut connection)
                .map_err(SubmissionStoreError::persistence)
        })
        .await
        .map_err(SubmissionStoreError::persistence)?
    }
}
