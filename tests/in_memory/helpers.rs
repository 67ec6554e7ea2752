//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeDelta, Utc};
use classtask::assignment::{
    adapters::memory::{InMemorySubmissionStore, InMemoryTaskRepository},
    domain::{Task, TaskDetails, TaskId, TeacherId},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskBatchService, TaskLifecycleService},
};
use classtask::retention::{RetentionSweeper, RetentionWindow};
use classtask::roster::adapters::memory::InMemoryRosterRepository;
use mockable::{Clock, DefaultClock};
use rstest::fixture;

/// Lifecycle service type used by the in-memory suites.
pub type TestLifecycle =
    TaskLifecycleService<InMemoryTaskRepository, InMemorySubmissionStore, DefaultClock>;

/// Batch service type used by the in-memory suites.
pub type TestBatch =
    TaskBatchService<InMemoryTaskRepository, InMemorySubmissionStore, DefaultClock>;

/// Clock pinned to one instant, for deterministic retention scenarios.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fully wired in-memory stack shared by the suites.
pub struct Stack {
    /// Task repository backing every service.
    pub tasks: Arc<InMemoryTaskRepository>,
    /// Submission store backing cascades.
    pub submissions: Arc<InMemorySubmissionStore>,
    /// Roster repository backing the sweep.
    pub rosters: Arc<InMemoryRosterRepository>,
    /// Transition engine under test.
    pub lifecycle: TestLifecycle,
    /// Batch applier under test.
    pub batch: TestBatch,
    /// Owner used for seeded records.
    pub teacher: TeacherId,
}

/// Provides a fresh in-memory stack for each test.
#[fixture]
pub fn stack() -> Stack {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let submissions = Arc::new(InMemorySubmissionStore::new());
    let rosters = Arc::new(InMemoryRosterRepository::new());
    let clock = Arc::new(DefaultClock);
    let lifecycle = TaskLifecycleService::new(
        Arc::clone(&tasks),
        Arc::clone(&submissions),
        Arc::clone(&clock),
    );
    let batch = TaskBatchService::new(Arc::clone(&tasks), Arc::clone(&submissions), clock);
    Stack {
        tasks,
        submissions,
        rosters,
        lifecycle,
        batch,
        teacher: TeacherId::new(),
    }
}

/// Builds a sweeper over the stack's stores, observing `now` as wall-clock
/// time.
#[must_use]
pub fn sweeper_at(
    stack: &Stack,
    now: DateTime<Utc>,
) -> RetentionSweeper<
    InMemoryTaskRepository,
    InMemorySubmissionStore,
    InMemoryRosterRepository,
    FixedClock,
> {
    RetentionSweeper::new(
        Arc::clone(&stack.tasks),
        Arc::clone(&stack.submissions),
        Arc::clone(&stack.rosters),
        Arc::new(FixedClock(now)),
        RetentionWindow::default(),
    )
}

/// Creates a task through the service and returns its identifier.
pub async fn create_task(stack: &Stack, title: &str) -> TaskId {
    stack
        .lifecycle
        .create(CreateTaskRequest::new(stack.teacher, title))
        .await
        .expect("task creation should succeed")
        .id()
}

/// Stores a task directly whose deletion marker is `age` old relative to
/// `now`, bypassing the service so retention scenarios can age records.
pub async fn seed_deleted_task(
    stack: &Stack,
    now: DateTime<Utc>,
    age: TimeDelta,
    title: &str,
) -> TaskId {
    let past = FixedClock(now - age);
    let mut task = Task::new(
        stack.teacher,
        TaskDetails::new(title).expect("valid title"),
        &past,
    );
    task.soft_delete(stack.teacher, &past)
        .expect("soft delete should succeed");
    stack
        .tasks
        .store(&task)
        .await
        .expect("store should succeed");
    task.id()
}

/// Parses an RFC 3339 timestamp for scenario setup.
#[must_use]
pub fn instant(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}
