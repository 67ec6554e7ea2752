//! `PostgreSQL` adapters for assignment ports.

pub mod models;
pub mod repository;
pub mod schema;
mod submissions;

pub use repository::{PostgresTaskRepository, TaskPgPool};
pub use submissions::PostgresSubmissionStore;
