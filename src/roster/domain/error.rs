//! Error types for roster domain validation and membership transitions.

use super::{ClassId, StudentId};
use crate::assignment::domain::TeacherId;
use thiserror::Error;

/// Errors returned while mutating class rosters.
///
/// As with tasks, the ownership check precedes every state check, so a
/// non-owner always observes [`RosterDomainError::NotOwner`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterDomainError {
    /// The acting teacher does not own the class.
    #[error("teacher {actor} does not own class {class_id}")]
    NotOwner {
        /// Class whose mutation was refused.
        class_id: ClassId,
        /// Teacher that attempted the mutation.
        actor: TeacherId,
    },

    /// The student already has a roster entry.
    #[error("student {student} is already enrolled in class {class_id}")]
    AlreadyEnrolled {
        /// Class holding the entry.
        class_id: ClassId,
        /// Student that was enrolled twice.
        student: StudentId,
    },

    /// The student has no roster entry.
    #[error("student {student} is not enrolled in class {class_id}")]
    NotEnrolled {
        /// Class missing the entry.
        class_id: ClassId,
        /// Student without an entry.
        student: StudentId,
    },

    /// The student's entry already carries a removal marker.
    #[error("student {student} has already been removed from class {class_id}")]
    AlreadyRemoved {
        /// Class holding the entry.
        class_id: ClassId,
        /// Removed student.
        student: StudentId,
    },

    /// The operation requires a removed entry.
    #[error("student {student} has not been removed from class {class_id}")]
    NotRemoved {
        /// Class holding the entry.
        class_id: ClassId,
        /// Still-enrolled student.
        student: StudentId,
    },

    /// The display name is empty after trimming.
    #[error("student display name must not be empty")]
    EmptyDisplayName,
}
