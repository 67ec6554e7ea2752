//! Retention window math for soft-deleted records.

use chrono::{DateTime, TimeDelta, Utc};

/// Number of whole days a soft-deleted record remains restorable.
///
/// All figures derived from the window (`days_left`, expiry instants) are
/// computed at read time and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionWindow {
    days: u32,
}

impl RetentionWindow {
    /// Default restore window, in days.
    pub const DEFAULT_DAYS: u32 = 30;

    /// Creates a window spanning the given number of days.
    #[must_use]
    pub const fn from_days(days: u32) -> Self {
        Self { days }
    }

    /// Returns the window length in days.
    #[must_use]
    pub const fn days(self) -> u32 {
        self.days
    }

    /// Returns the instant at which a record deleted at `deleted_at`
    /// becomes eligible for permanent removal.
    #[must_use]
    pub fn expires_at(self, deleted_at: DateTime<Utc>) -> DateTime<Utc> {
        deleted_at + self.delta()
    }

    /// Returns the deletion-timestamp cutoff for a sweep running at `now`:
    /// records deleted strictly before the cutoff have expired.
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.delta()
    }

    /// Returns `true` when a record deleted at `deleted_at` has outlived the
    /// window at `now`.
    ///
    /// The comparison is strict: a record deleted exactly one window ago is
    /// not yet expired.
    #[must_use]
    pub fn is_expired(self, deleted_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        deleted_at < self.cutoff(now)
    }

    /// Returns the whole days remaining before expiry, clamped to zero.
    #[must_use]
    pub fn days_left(self, deleted_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
        let elapsed_days = now.signed_duration_since(deleted_at).num_days();
        let used = u32::try_from(elapsed_days.clamp(0, i64::from(self.days))).unwrap_or(self.days);
        self.days - used
    }

    fn delta(self) -> TimeDelta {
        // In range for any u32 day count, so the fallback never engages.
        TimeDelta::try_days(i64::from(self.days)).unwrap_or_default()
    }
}

impl Default for RetentionWindow {
    fn default() -> Self {
        Self::from_days(Self::DEFAULT_DAYS)
    }
}
