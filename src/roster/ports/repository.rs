//! Repository port for class roster persistence and lookup.

use crate::assignment::domain::TeacherId;
use crate::roster::domain::{ClassId, ClassRoster};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for roster repository operations.
pub type RosterRepositoryResult<T> = Result<T, RosterRepositoryError>;

/// Roster persistence contract.
///
/// A roster and its entries persist as one record; `update` writes the
/// whole aggregate so entry markers and histories stay consistent.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Stores a new roster.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::DuplicateRoster`] when the class ID
    /// already exists.
    async fn store(&self, roster: &ClassRoster) -> RosterRepositoryResult<()>;

    /// Persists changes to an existing roster as one whole-aggregate write.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::NotFound`] when the roster does not
    /// exist.
    async fn update(&self, roster: &ClassRoster) -> RosterRepositoryResult<()>;

    /// Finds a roster by class identifier.
    ///
    /// Returns `None` when the roster does not exist.
    async fn find_by_id(&self, id: ClassId) -> RosterRepositoryResult<Option<ClassRoster>>;

    /// Returns all rosters owned by `owner`.
    async fn find_by_owner(&self, owner: TeacherId) -> RosterRepositoryResult<Vec<ClassRoster>>;

    /// Returns rosters containing at least one entry whose removal marker is
    /// strictly older than `cutoff`.
    async fn find_with_expired_removals(
        &self,
        cutoff: DateTime<Utc>,
    ) -> RosterRepositoryResult<Vec<ClassRoster>>;
}

/// Errors returned by roster repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RosterRepositoryError {
    /// A roster with the same identifier already exists.
    #[error("duplicate class identifier: {0}")]
    DuplicateRoster(ClassId),

    /// The roster was not found.
    #[error("class roster not found: {0}")]
    NotFound(ClassId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RosterRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
