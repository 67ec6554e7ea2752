//! Application services for assignment lifecycle orchestration.

mod batch;
mod lifecycle;

pub use batch::{
    BatchItemOutcome, BatchOperation, BatchOutcome, TaskBatchError, TaskBatchResult,
    TaskBatchService,
};
pub use lifecycle::{
    CreateTaskRequest, DeletedTaskSummary, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
