//! `PostgreSQL` adapters for roster ports.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresRosterRepository, RosterPgPool};
