//! Port contracts for assignment lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by assignment
//! services.

pub mod repository;
pub mod submissions;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use submissions::{SubmissionStore, SubmissionStoreError, SubmissionStoreResult};
