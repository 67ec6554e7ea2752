//! Service layer for class roster membership operations.

use crate::assignment::domain::TeacherId;
use crate::roster::{
    domain::{ClassId, ClassRoster, RosterDomainError, StudentEntry, StudentId},
    ports::{RosterRepository, RosterRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for roster membership operations.
#[derive(Debug, Error)]
pub enum RosterMembershipError {
    /// Domain validation or a membership precondition failed.
    #[error(transparent)]
    Domain(#[from] RosterDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RosterRepositoryError),
    /// No roster exists with the given identifier.
    #[error("class roster {0} not found")]
    NotFound(ClassId),
}

/// Result type for roster membership service operations.
pub type RosterMembershipResult<T> = Result<T, RosterMembershipError>;

/// Roster membership orchestration service.
#[derive(Clone)]
pub struct RosterMembershipService<R, C>
where
    R: RosterRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> RosterMembershipService<R, C>
where
    R: RosterRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new roster membership service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    async fn find_roster_or_error(&self, class_id: ClassId) -> RosterMembershipResult<ClassRoster> {
        self.repository
            .find_by_id(class_id)
            .await?
            .ok_or(RosterMembershipError::NotFound(class_id))
    }

    /// Creates and persists a new empty roster.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn create_roster(&self, owner: TeacherId) -> RosterMembershipResult<ClassRoster> {
        let roster = ClassRoster::new(owner, &*self.clock);
        self.repository.store(&roster).await?;
        Ok(roster)
    }

    /// Retrieves a roster by class identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RosterMembershipError::NotFound`] when no roster has the
    /// given ID, or repository errors.
    pub async fn roster(&self, class_id: ClassId) -> RosterMembershipResult<ClassRoster> {
        self.find_roster_or_error(class_id).await
    }

    /// Returns the entries of a roster that carry no removal marker.
    ///
    /// # Errors
    ///
    /// Returns [`RosterMembershipError::NotFound`] when no roster has the
    /// given ID, or repository errors.
    pub async fn list_active_entries(
        &self,
        class_id: ClassId,
    ) -> RosterMembershipResult<Vec<StudentEntry>> {
        let roster = self.find_roster_or_error(class_id).await?;
        Ok(roster.active_entries().cloned().collect())
    }

    /// Enrolls a student in a class.
    ///
    /// # Errors
    ///
    /// Returns [`RosterMembershipError::NotFound`] for unknown classes,
    /// domain errors for ownership and precondition failures, and
    /// repository errors.
    pub async fn enroll(
        &self,
        class_id: ClassId,
        student: StudentId,
        display_name: impl Into<String> + Send,
        actor: TeacherId,
    ) -> RosterMembershipResult<ClassRoster> {
        let mut roster = self.find_roster_or_error(class_id).await?;
        roster.enroll(student, display_name, actor, &*self.clock)?;
        self.repository.update(&roster).await?;
        Ok(roster)
    }

    /// Changes a student's display name.
    ///
    /// # Errors
    ///
    /// Returns [`RosterMembershipError::NotFound`] for unknown classes,
    /// domain errors for ownership and precondition failures, and
    /// repository errors.
    pub async fn update_student_name(
        &self,
        class_id: ClassId,
        student: StudentId,
        display_name: impl Into<String> + Send,
        actor: TeacherId,
    ) -> RosterMembershipResult<ClassRoster> {
        let mut roster = self.find_roster_or_error(class_id).await?;
        roster.update_student_name(student, display_name, actor, &*self.clock)?;
        self.repository.update(&roster).await?;
        Ok(roster)
    }

    /// Removes a student from a class roster.
    ///
    /// # Errors
    ///
    /// Returns [`RosterMembershipError::NotFound`] for unknown classes,
    /// domain errors for ownership and precondition failures, and
    /// repository errors.
    pub async fn remove_student(
        &self,
        class_id: ClassId,
        student: StudentId,
        actor: TeacherId,
    ) -> RosterMembershipResult<ClassRoster> {
        let mut roster = self.find_roster_or_error(class_id).await?;
        roster.remove_student(student, actor, &*self.clock)?;
        self.repository.update(&roster).await?;
        Ok(roster)
    }

    /// Undoes a student's removal.
    ///
    /// # Errors
    ///
    /// Returns [`RosterMembershipError::NotFound`] for unknown classes,
    /// domain errors for ownership and precondition failures, and
    /// repository errors.
    pub async fn restore_student(
        &self,
        class_id: ClassId,
        student: StudentId,
        actor: TeacherId,
    ) -> RosterMembershipResult<ClassRoster> {
        let mut roster = self.find_roster_or_error(class_id).await?;
        roster.restore_student(student, actor, &*self.clock)?;
        self.repository.update(&roster).await?;
        Ok(roster)
    }
}
