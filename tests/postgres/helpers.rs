//! Shared test helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, Local, Utc};
use classtask::assignment::adapters::postgres::{TaskPgPool, schema::submissions};
use classtask::assignment::domain::TaskId;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::Clock;
use std::sync::OnceLock;
use uuid::Uuid;

/// SQL to create the base schema for tests.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-07-01-000000_create_lifecycle_tables/up.sql");

static SCHEMA: OnceLock<()> = OnceLock::new();

/// Clock pinned to one instant, for ageing records into the retention
/// window.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a pool against `CLASSTASK_TEST_DATABASE_URL`, applying the schema
/// on first use.
///
/// Returns `None` when the variable is unset, letting callers skip.
pub fn test_pool() -> Option<TaskPgPool> {
    let url = std::env::var("CLASSTASK_TEST_DATABASE_URL").ok()?;
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder().max_size(4).build(manager).ok()?;

    SCHEMA.get_or_init(|| {
        let mut connection = pool.get().expect("pool connection for schema setup");
        // Later runs find the tables already in place; the first failure
        // mode that matters surfaces in the tests themselves.
        drop(connection.batch_execute(CREATE_SCHEMA_SQL));
    });
    Some(pool)
}

/// Inserts one submission row referencing `task`.
pub fn seed_submission(pool: &TaskPgPool, task: TaskId) {
    let mut connection = pool.get().expect("pool connection");
    diesel::insert_into(submissions::table)
        .values((
            submissions::id.eq(Uuid::new_v4()),
            submissions::task_id.eq(task.into_inner()),
            submissions::student.eq(Uuid::new_v4()),
            submissions::payload.eq(serde_json::json!({"text": "submitted work"})),
            submissions::submitted_at.eq(Utc::now()),
        ))
        .execute(&mut connection)
        .expect("insert submission");
}

/// Counts submission rows referencing `task`.
pub fn count_submissions(pool: &TaskPgPool, task: TaskId) -> i64 {
    let mut connection = pool.get().expect("pool connection");
    submissions::table
        .filter(submissions::task_id.eq(task.into_inner()))
        .count()
        .get_result(&mut connection)
        .expect("count submissions")
}
