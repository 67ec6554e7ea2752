//! Expiry sweep over soft-deleted tasks and removed roster entries.

use crate::assignment::domain::TaskId;
use crate::assignment::ports::{
    SubmissionStore, SubmissionStoreError, TaskRepository, TaskRepositoryError,
};
use crate::retention::RetentionWindow;
use crate::roster::ports::RosterRepository;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Tally of one sweep run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Tasks permanently removed.
    pub tasks_deleted: usize,
    /// Submissions removed by task cascades.
    pub submissions_deleted: usize,
    /// Rosters from which expired entries were struck.
    pub rosters_compacted: usize,
    /// Roster entries permanently struck.
    pub entries_purged: usize,
    /// Records skipped because of isolated failures.
    pub failures: usize,
}

#[derive(Debug, Error)]
enum TaskPurgeError {
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    #[error(transparent)]
    Submissions(#[from] SubmissionStoreError),
}

/// Permanently removes records whose retention window has elapsed.
///
/// The sweep is infallible by design: per-record trouble is logged, counted
/// in the report, and never propagated, so the recurring schedule driving it
/// cannot be killed by one bad record or a failing query. Running the sweep
/// twice in a row with no new expirations is a no-op.
pub struct RetentionSweeper<R, S, P, C>
where
    R: TaskRepository,
    S: SubmissionStore,
    P: RosterRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    submissions: Arc<S>,
    rosters: Arc<P>,
    clock: Arc<C>,
    window: RetentionWindow,
}

impl<R, S, P, C> RetentionSweeper<R, S, P, C>
where
    R: TaskRepository,
    S: SubmissionStore,
    P: RosterRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sweeper over the given collaborators.
    #[must_use]
    pub const fn new(
        tasks: Arc<R>,
        submissions: Arc<S>,
        rosters: Arc<P>,
        clock: Arc<C>,
        window: RetentionWindow,
    ) -> Self {
        Self {
            tasks,
            submissions,
            rosters,
            clock,
            window,
        }
    }

    /// Returns the retention window the sweeper enforces.
    #[must_use]
    pub const fn window(&self) -> RetentionWindow {
        self.window
    }

    /// Runs one sweep over expired tasks and roster entries.
    pub async fn sweep(&self) -> SweepReport {
        let cutoff = self.window.cutoff(self.clock.utc());
        let mut report = SweepReport::default();
        self.sweep_tasks(cutoff, &mut report).await;
        self.sweep_rosters(cutoff, &mut report).await;

        tracing::info!(
            tasks_deleted = report.tasks_deleted,
            submissions_deleted = report.submissions_deleted,
            rosters_compacted = report.rosters_compacted,
            entries_purged = report.entries_purged,
            failures = report.failures,
            "retention sweep finished"
        );
        report
    }

    async fn sweep_tasks(&self, cutoff: DateTime<Utc>, report: &mut SweepReport) {
        let expired = match self.tasks.find_deleted_before(cutoff).await {
            Ok(expired) => expired,
            Err(err) => {
                tracing::warn!(error = %err, "expired task query failed");
                report.failures += 1;
                return;
            }
        };

        for task in expired {
            let task_id = task.id();
            match self.purge_task(task_id).await {
                Ok(submissions_deleted) => {
                    report.tasks_deleted += 1;
                    report.submissions_deleted += submissions_deleted;
                }
                Err(err) => {
                    tracing::warn!(task = %task_id, error = %err, "failed to purge expired task");
                    report.failures += 1;
                }
            }
        }
    }

    async fn purge_task(&self, task_id: TaskId) -> Result<usize, TaskPurgeError> {
        let submissions_deleted = self.submissions.delete_for_task(task_id).await?;
        self.tasks.delete_hard(task_id).await?;
        Ok(submissions_deleted)
    }

    async fn sweep_rosters(&self, cutoff: DateTime<Utc>, report: &mut SweepReport) {
        let expired = match self.rosters.find_with_expired_removals(cutoff).await {
            Ok(expired) => expired,
            Err(err) => {
                tracing::warn!(error = %err, "expired roster entry query failed");
                report.failures += 1;
                return;
            }
        };

        for mut roster in expired {
            let class_id = roster.id();
            let purged = roster.purge_removed_before(cutoff);
            if purged == 0 {
                continue;
            }
            match self.rosters.update(&roster).await {
                Ok(()) => {
                    report.rosters_compacted += 1;
                    report.entries_purged += purged;
                }
                Err(err) => {
                    tracing::warn!(
                        class = %class_id,
                        error = %err,
                        "failed to compact roster with expired removals"
                    );
                    report.failures += 1;
                }
            }
        }
    }
}
