//! Daily sweep scheduling at a fixed wall-clock hour.

use chrono::{NaiveDateTime, TimeDelta};
use std::time::Duration;
use thiserror::Error;

/// Error returned when a sweep hour falls outside `0..24`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("sweep hour {0} is out of range 0..24")]
pub struct InvalidSweepHour(pub u32);

/// Fixed local wall-clock hour at which the daily sweep fires.
///
/// The next run is computed as a delay to the next occurrence of the hour
/// rather than as a fixed interval, so a single delayed run self-corrects:
/// however late one sweep fires, the following one is armed for the next
/// scheduled hour, not twenty-four hours after the late run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSchedule {
    hour: u32,
}

impl SweepSchedule {
    /// Default sweep hour (02:00 local time).
    pub const DEFAULT_HOUR: u32 = 2;

    /// Creates a schedule firing daily at the given local hour.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSweepHour`] when `hour` is 24 or greater.
    pub const fn at_hour(hour: u32) -> Result<Self, InvalidSweepHour> {
        if hour >= 24 {
            return Err(InvalidSweepHour(hour));
        }
        Ok(Self { hour })
    }

    /// Returns the scheduled hour.
    #[must_use]
    pub const fn hour(self) -> u32 {
        self.hour
    }

    /// Returns the delay from `now` until the next occurrence of the
    /// scheduled hour.
    ///
    /// When `now` sits exactly on the scheduled hour the delay is a full
    /// day; the caller is expected to have just run the sweep.
    #[must_use]
    pub fn delay_until_next(self, now: NaiveDateTime) -> Duration {
        // The hour is validated at construction, so the fallback never
        // engages.
        let today = now.date().and_hms_opt(self.hour, 0, 0).unwrap_or(now);
        let next = if today > now {
            today
        } else {
            today + TimeDelta::days(1)
        };
        next.signed_duration_since(now)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for SweepSchedule {
    fn default() -> Self {
        Self {
            hour: Self::DEFAULT_HOUR,
        }
    }
}
