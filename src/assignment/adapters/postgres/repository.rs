//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{TaskRow, TaskWriteRow},
    schema::tasks,
};
use crate::assignment::{
    domain::{
        ArchiveState, DeletionState, LifecycleStage, OperationHistory, PersistedTaskData, Task,
        TaskDetails, TaskId, TeacherId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by assignment adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_write_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_write_row(task)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_owner(
        &self,
        owner: TeacherId,
        stage: Option<LifecycleStage>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .filter(tasks::owner.eq(owner.into_inner()))
                .into_boxed();
            match stage {
                Some(LifecycleStage::Active) => {
                    query = query
                        .filter(tasks::deleted_at.is_null())
                        .filter(tasks::archived_at.is_null());
                }
                Some(LifecycleStage::Archived) => {
                    query = query
                        .filter(tasks::deleted_at.is_null())
                        .filter(tasks::archived_at.is_not_null());
                }
                Some(LifecycleStage::Deleted) => {
                    query = query.filter(tasks::deleted_at.is_not_null());
                }
                None => {}
            }

            let rows = query
                .order(tasks::created_at.asc())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_owned(
        &self,
        ids: &[TaskId],
        owner: TeacherId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let raw_ids: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq_any(raw_ids))
                .filter(tasks::owner.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_deleted_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::deleted_at.lt(cutoff))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete_hard(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_write_row(task: &Task) -> TaskRepositoryResult<TaskWriteRow> {
    let history =
        serde_json::to_value(task.history()).map_err(TaskRepositoryError::persistence)?;

    Ok(TaskWriteRow {
        id: task.id().into_inner(),
        owner: task.owner().into_inner(),
        title: task.details().title().to_owned(),
        category: task.details().category().map(str::to_owned),
        deadline: task.details().deadline(),
        archived_at: task.archive_state().map(ArchiveState::archived_at),
        archived_by: task.archive_state().map(|marker| marker.archived_by().into_inner()),
        archived_student_view: task.archive_state().map(ArchiveState::allow_student_view),
        deleted_at: task.deletion_state().map(DeletionState::deleted_at),
        deleted_by: task.deletion_state().map(|marker| marker.deleted_by().into_inner()),
        history,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let archive = marker_from_columns(
        row.archived_at,
        row.archived_by,
        row.archived_student_view,
        "archive",
    )?;
    let deletion = match (row.deleted_at, row.deleted_by) {
        (Some(deleted_at), Some(deleted_by)) => Some(DeletionState::from_persisted(
            deleted_at,
            TeacherId::from_uuid(deleted_by),
        )),
        (None, None) => None,
        _ => return Err(inconsistent_columns("deletion")),
    };

    let history: OperationHistory =
        serde_json::from_value(row.history).map_err(TaskRepositoryError::persistence)?;
    let mut details = TaskDetails::new(row.title).map_err(TaskRepositoryError::persistence)?;
    if let Some(category) = row.category {
        details = details.with_category(category);
    }
    if let Some(deadline) = row.deadline {
        details = details.with_deadline(deadline);
    }

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        owner: TeacherId::from_uuid(row.owner),
        details,
        archive,
        deletion,
        history,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn marker_from_columns(
    archived_at: Option<DateTime<Utc>>,
    archived_by: Option<uuid::Uuid>,
    allow_student_view: Option<bool>,
    marker: &str,
) -> TaskRepositoryResult<Option<ArchiveState>> {
    match (archived_at, archived_by, allow_student_view) {
        (Some(at), Some(by), Some(view)) => Ok(Some(ArchiveState::from_persisted(
            at,
            TeacherId::from_uuid(by),
            view,
        ))),
        (None, None, None) => Ok(None),
        _ => Err(inconsistent_columns(marker)),
    }
}

fn inconsistent_columns(marker: &str) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(format!(
        "inconsistent {marker} marker columns"
    )))
}
