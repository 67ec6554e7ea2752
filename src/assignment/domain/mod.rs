//! Domain model for assignment lifecycle management.
//!
//! The assignment domain models task creation, archive and recycle-bin
//! transitions, and the append-only operation history, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod history;
mod ids;
mod task;

pub use error::{ParseOperationKindError, TaskDomainError};
pub use history::{OperationHistory, OperationKind, OperationRecord};
pub use ids::{TaskId, TeacherId};
pub use task::{
    ArchiveOptions, ArchiveState, DeletionState, LifecycleStage, PersistedTaskData, Task,
    TaskDetails,
};
