//! `PostgreSQL` repository implementation for class roster storage.

use super::{
    models::{RosterRow, RosterWriteRow},
    schema::class_rosters,
};
use crate::assignment::domain::TeacherId;
use crate::roster::{
    domain::{ClassId, ClassRoster, PersistedRosterData, StudentEntry},
    ports::{RosterRepository, RosterRepositoryError, RosterRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by roster adapters.
pub type RosterPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed roster repository.
#[derive(Debug, Clone)]
pub struct PostgresRosterRepository {
    pool: RosterPgPool,
}

impl PostgresRosterRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RosterPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RosterRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RosterRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RosterRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RosterRepositoryError::persistence)?
    }
}

#[async_trait]
impl RosterRepository for PostgresRosterRepository {
    async fn store(&self, roster: &ClassRoster) -> RosterRepositoryResult<()> {
        let class_id = roster.id();
        let row = to_write_row(roster)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(class_rosters::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RosterRepositoryError::DuplicateRoster(class_id)
                    }
                    _ => RosterRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, roster: &ClassRoster) -> RosterRepositoryResult<()> {
        let class_id = roster.id();
        let row = to_write_row(roster)?;

        self.run_blocking(move |connection| {
            let updated =
                diesel::update(class_rosters::table.filter(class_rosters::id.eq(class_id.into_inner())))
                    .set(&row)
                    .execute(connection)
                    .map_err(RosterRepositoryError::persistence)?;
            if updated == 0 {
                return Err(RosterRepositoryError::NotFound(class_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ClassId) -> RosterRepositoryResult<Option<ClassRoster>> {
        self.run_blocking(move |connection| {
            let row = class_rosters::table
                .filter(class_rosters::id.eq(id.into_inner()))
                .select(RosterRow::as_select())
                .first::<RosterRow>(connection)
                .optional()
                .map_err(RosterRepositoryError::persistence)?;
            row.map(row_to_roster).transpose()
        })
        .await
    }

    async fn find_by_owner(&self, owner: TeacherId) -> RosterRepositoryResult<Vec<ClassRoster>> {
        self.run_blocking(move |connection| {
            let rows = class_rosters::table
                .filter(class_rosters::owner.eq(owner.into_inner()))
                .order(class_rosters::created_at.asc())
                .select(RosterRow::as_select())
                .load::<RosterRow>(connection)
                .map_err(RosterRepositoryError::persistence)?;
            rows.into_iter().map(row_to_roster).collect()
        })
        .await
    }

    async fn find_with_expired_removals(
        &self,
        cutoff: DateTime<Utc>,
    ) -> RosterRepositoryResult<Vec<ClassRoster>> {
        self.run_blocking(move |connection| {
            let rows = find_rosters_with_expired_removals(connection, cutoff)?;
            rows.into_iter().map(row_to_roster).collect()
        })
        .await
    }
}

fn to_write_row(roster: &ClassRoster) -> RosterRepositoryResult<RosterWriteRow> {
    let entries =
        serde_json::to_value(roster.entries()).map_err(RosterRepositoryError::persistence)?;

    Ok(RosterWriteRow {
        id: roster.id().into_inner(),
        owner: roster.owner().into_inner(),
        entries,
        created_at: roster.created_at(),
        updated_at: roster.updated_at(),
    })
}

fn row_to_roster(row: RosterRow) -> RosterRepositoryResult<ClassRoster> {
    let entries: Vec<StudentEntry> =
        serde_json::from_value(row.entries).map_err(RosterRepositoryError::persistence)?;

    let data = PersistedRosterData {
        id: ClassId::from_uuid(row.id),
        owner: TeacherId::from_uuid(row.owner),
        entries,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(ClassRoster::from_persisted(data))
}

fn find_rosters_with_expired_removals(
    connection: &mut PgConnection,
    cutoff: DateTime<Utc>,
) -> RosterRepositoryResult<Vec<RosterRow>> {
    // The typed DSL cannot reach into the entries array, so this mirrors the
    // JSONB path the aggregate uses: an entry has expired when its removal
    // marker's timestamp lies strictly before the cutoff.
    let query = diesel::sql_query(concat!(
        "SELECT id, owner, entries, created_at, updated_at FROM class_rosters ",
        "WHERE EXISTS (",
        "SELECT 1 FROM jsonb_array_elements(entries) AS entry ",
        "WHERE (entry->'removal'->>'removed_at')::timestamptz < $1",
        ")",
    ))
    .bind::<diesel::sql_types::Timestamptz, _>(cutoff);

    query
        .load::<RosterRow>(connection)
        .map_err(RosterRepositoryError::persistence)
}
