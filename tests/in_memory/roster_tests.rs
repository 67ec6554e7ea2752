//! Membership flows against the roster service.

use classtask::assignment::domain::TeacherId;
use classtask::roster::{
    adapters::memory::InMemoryRosterRepository,
    domain::{RosterAction, RosterDomainError, StudentId},
    services::{RosterMembershipError, RosterMembershipService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestService = RosterMembershipService<InMemoryRosterRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    RosterMembershipService::new(
        Arc::new(InMemoryRosterRepository::new()),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_students_roster_journey_is_fully_audited(service: TestService) {
    let teacher = TeacherId::new();
    let student = StudentId::new();

    let roster = service
        .create_roster(teacher)
        .await
        .expect("roster creation should succeed");
    service
        .enroll(roster.id(), student, "Jonah Whitfield", teacher)
        .await
        .expect("enroll should succeed");
    service
        .update_student_name(roster.id(), student, "Jonah Whitfield-Osei", teacher)
        .await
        .expect("rename should succeed");
    service
        .remove_student(roster.id(), student, teacher)
        .await
        .expect("removal should succeed");
    let restored = service
        .restore_student(roster.id(), student, teacher)
        .await
        .expect("restore should succeed");

    let entry = restored.entry(student).expect("entry exists");
    assert!(!entry.is_removed());
    assert_eq!(entry.display_name(), "Jonah Whitfield-Osei");
    let active = service
        .list_active_entries(roster.id())
        .await
        .expect("listing should succeed");
    assert!(active.iter().any(|active_entry| active_entry.student() == student));
    let actions: Vec<RosterAction> = entry.history().iter().map(|record| record.action()).collect();
    assert_eq!(
        actions,
        vec![
            RosterAction::Enroll,
            RosterAction::UpdateName,
            RosterAction::Remove,
            RosterAction::Restore,
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn another_teacher_cannot_touch_the_roster(service: TestService) {
    let teacher = TeacherId::new();
    let student = StudentId::new();
    let roster = service
        .create_roster(teacher)
        .await
        .expect("roster creation should succeed");
    service
        .enroll(roster.id(), student, "Jonah Whitfield", teacher)
        .await
        .expect("enroll should succeed");

    let stranger = TeacherId::new();
    let result = service
        .remove_student(roster.id(), student, stranger)
        .await;

    assert!(matches!(
        result,
        Err(RosterMembershipError::Domain(
            RosterDomainError::NotOwner { .. }
        ))
    ));
    let unchanged = service
        .roster(roster.id())
        .await
        .expect("lookup should succeed");
    assert!(!unchanged.entry(student).expect("entry exists").is_removed());
}
