//! Recurring driver for the retention sweep.

use crate::assignment::ports::{SubmissionStore, TaskRepository};
use crate::retention::{RetentionSweeper, SweepSchedule};
use crate::roster::ports::RosterRepository;
use mockable::Clock;
use std::sync::Arc;

/// Runs the retention sweep once daily at a fixed local hour.
///
/// The loop arms each run by computing the delay to the next scheduled hour
/// from the current wall clock, so a delayed or slow sweep does not shift
/// subsequent runs. Sweeps cannot fail, so the schedule cannot stall; the
/// loop only ends with process shutdown.
pub struct RetentionScheduler<R, S, P, C>
where
    R: TaskRepository,
    S: SubmissionStore,
    P: RosterRepository,
    C: Clock + Send + Sync,
{
    sweeper: Arc<RetentionSweeper<R, S, P, C>>,
    schedule: SweepSchedule,
    clock: Arc<C>,
    sweep_on_start: bool,
}

impl<R, S, P, C> RetentionScheduler<R, S, P, C>
where
    R: TaskRepository,
    S: SubmissionStore,
    P: RosterRepository,
    C: Clock + Send + Sync,
{
    /// Creates a scheduler that only sweeps at the scheduled hour.
    #[must_use]
    pub const fn new(
        sweeper: Arc<RetentionSweeper<R, S, P, C>>,
        schedule: SweepSchedule,
        clock: Arc<C>,
    ) -> Self {
        Self {
            sweeper,
            schedule,
            clock,
            sweep_on_start: false,
        }
    }

    /// Also runs one sweep immediately when [`RetentionScheduler::run`]
    /// starts, before the first scheduled delay. Intended for
    /// non-production environments where waiting for the scheduled hour
    /// hides retention bugs.
    #[must_use]
    pub const fn with_sweep_on_start(mut self, sweep_on_start: bool) -> Self {
        self.sweep_on_start = sweep_on_start;
        self
    }

    /// Returns the schedule driving the loop.
    #[must_use]
    pub const fn schedule(&self) -> SweepSchedule {
        self.schedule
    }

    /// Drives the sweep until the process shuts down.
    pub async fn run(&self) {
        if self.sweep_on_start {
            tracing::info!("running startup retention sweep");
            self.sweeper.sweep().await;
        }

        loop {
            let delay = self.schedule.delay_until_next(self.clock.local().naive_local());
            tracing::debug!(
                delay_secs = delay.as_secs(),
                hour = self.schedule.hour(),
                "next retention sweep armed"
            );
            tokio::time::sleep(delay).await;
            self.sweeper.sweep().await;
        }
    }
}
