//! End-to-end retention flows: ageing, listing, sweeping.

use super::helpers::{FixedClock, Stack, instant, seed_deleted_task, stack, sweeper_at};
use chrono::TimeDelta;
use classtask::retention::{RetentionWindow, SweepReport};
use classtask::roster::domain::{ClassRoster, StudentId};
use classtask::roster::ports::RosterRepository;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_purges_expired_tasks_with_their_submissions(stack: Stack) {
    let now = instant("2026-06-15T02:00:00Z");
    let expired = seed_deleted_task(
        &stack,
        now,
        TimeDelta::days(30) + TimeDelta::seconds(1),
        "Forgotten quiz",
    )
    .await;
    let fresh = seed_deleted_task(&stack, now, TimeDelta::days(29), "Recently binned").await;
    stack
        .submissions
        .record(expired, json!({"text": "old answer"}))
        .expect("seed submission");

    let report = sweeper_at(&stack, now).sweep().await;

    assert_eq!(report.tasks_deleted, 1);
    assert_eq!(report.submissions_deleted, 1);
    assert_eq!(report.failures, 0);
    assert!(
        stack
            .lifecycle
            .get(expired)
            .await
            .is_err()
    );
    assert!(stack.lifecycle.get(fresh).await.is_ok());

    // With nothing newly expired, the next run finds nothing to do.
    let second = sweeper_at(&stack, now).sweep().await;
    assert_eq!(second, SweepReport::default());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_listing_counts_down_to_the_sweep(stack: Stack) {
    let now = instant("2026-06-15T02:00:00Z");
    let task_id = seed_deleted_task(&stack, now, TimeDelta::days(28), "Countdown task").await;

    let summaries = stack
        .lifecycle
        .list_deleted(stack.teacher, RetentionWindow::default())
        .await
        .expect("listing should succeed");

    let summary = summaries
        .iter()
        .find(|summary| summary.task.id() == task_id)
        .expect("summary for the seeded task");
    // The listing runs on the live clock while the record was aged against
    // a fixed instant; only the clamp is stable here.
    assert!(summary.days_left <= RetentionWindow::DEFAULT_DAYS);
    let deleted_at = summary
        .task
        .deletion_state()
        .expect("deletion marker")
        .deleted_at();
    assert_eq!(summary.will_be_deleted_at, deleted_at + TimeDelta::days(30));

    // Once the sweep has run at a time past expiry, the listing is empty.
    let later = now + TimeDelta::days(3);
    sweeper_at(&stack, later).sweep().await;
    let after = stack
        .lifecycle
        .list_deleted(stack.teacher, RetentionWindow::default())
        .await
        .expect("listing should succeed");
    assert!(after.iter().all(|summary| summary.task.id() != task_id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_strikes_expired_roster_removals_without_touching_the_rest(stack: Stack) {
    let now = instant("2026-06-15T02:00:00Z");
    let long_ago = FixedClock(now - TimeDelta::days(45));
    let last_week = FixedClock(now - TimeDelta::days(7));
    let graduated = StudentId::new();
    let transferred = StudentId::new();
    let enrolled = StudentId::new();

    let mut roster = ClassRoster::new(stack.teacher, &long_ago);
    roster
        .enroll(graduated, "Graduated student", stack.teacher, &long_ago)
        .expect("enroll should succeed");
    roster
        .enroll(transferred, "Transferred student", stack.teacher, &long_ago)
        .expect("enroll should succeed");
    roster
        .enroll(enrolled, "Enrolled student", stack.teacher, &long_ago)
        .expect("enroll should succeed");
    roster
        .remove_student(graduated, stack.teacher, &long_ago)
        .expect("removal should succeed");
    roster
        .remove_student(transferred, stack.teacher, &last_week)
        .expect("removal should succeed");
    stack
        .rosters
        .store(&roster)
        .await
        .expect("store should succeed");

    let report = sweeper_at(&stack, now).sweep().await;

    assert_eq!(report.rosters_compacted, 1);
    assert_eq!(report.entries_purged, 1);
    let swept = stack
        .rosters
        .find_by_id(roster.id())
        .await
        .expect("lookup should succeed")
        .expect("roster still exists");
    assert!(swept.entry(graduated).is_none());
    let transferred_entry = swept.entry(transferred).expect("entry kept");
    assert!(transferred_entry.is_removed());
    // The struck entry left no trace, while the kept entry's history is
    // intact.
    assert_eq!(transferred_entry.history().len(), 2);
    assert!(swept.entry(enrolled).is_some());
}
