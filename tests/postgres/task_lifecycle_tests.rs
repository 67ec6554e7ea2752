//! Row round-trips and cascade behaviour for the task adapters.

use super::helpers::{FixedClock, count_submissions, seed_submission, test_pool};
use chrono::{TimeDelta, Utc};
use classtask::assignment::{
    adapters::postgres::{PostgresSubmissionStore, PostgresTaskRepository},
    domain::{ArchiveOptions, LifecycleStage, Task, TaskDetails, TeacherId},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService},
};
use mockable::DefaultClock;
use std::sync::Arc;

type PgLifecycle = TaskLifecycleService<PostgresTaskRepository, PostgresSubmissionStore, DefaultClock>;

fn service_over(pool: &classtask::assignment::adapters::postgres::TaskPgPool) -> PgLifecycle {
    TaskLifecycleService::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(PostgresSubmissionStore::new(pool.clone())),
        Arc::new(DefaultClock),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_round_trip_preserves_markers_and_history() {
    let Some(pool) = test_pool() else { return };
    let service = service_over(&pool);
    let teacher = TeacherId::new();

    let created = service
        .create(
            CreateTaskRequest::new(teacher, "Persisted essay")
                .with_category("homework")
                .with_deadline(Utc::now() + TimeDelta::days(7)),
        )
        .await
        .expect("task creation should succeed");

    service
        .archive(created.id(), teacher, ArchiveOptions::new(false))
        .await
        .expect("archive should succeed");
    service
        .soft_delete(created.id(), teacher)
        .await
        .expect("soft delete should succeed");

    let fetched = service
        .get(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched.stage(), LifecycleStage::Deleted);
    assert!(fetched.is_archived());
    assert!(
        !fetched
            .archive_state()
            .expect("archive marker")
            .allow_student_view()
    );
    assert_eq!(fetched.history().len(), 2);
    assert_eq!(fetched.details().category(), Some("homework"));
}

#[tokio::test(flavor = "multi_thread")]
async fn clearing_markers_nulls_the_columns() {
    let Some(pool) = test_pool() else { return };
    let service = service_over(&pool);
    let teacher = TeacherId::new();

    let created = service
        .create(CreateTaskRequest::new(teacher, "Marker clearing"))
        .await
        .expect("task creation should succeed");
    service
        .archive(created.id(), teacher, ArchiveOptions::default())
        .await
        .expect("archive should succeed");
    service
        .unarchive(created.id(), teacher)
        .await
        .expect("unarchive should succeed");

    let fetched = service
        .get(created.id())
        .await
        .expect("lookup should succeed");
    assert!(fetched.archive_state().is_none());
    assert_eq!(fetched.stage(), LifecycleStage::Active);
    assert_eq!(fetched.history().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn stage_filters_follow_deletion_dominance() {
    let Some(pool) = test_pool() else { return };
    let service = service_over(&pool);
    let teacher = TeacherId::new();

    let archived = service
        .create(CreateTaskRequest::new(teacher, "Stays archived"))
        .await
        .expect("task creation should succeed");
    let buried = service
        .create(CreateTaskRequest::new(teacher, "Archived then deleted"))
        .await
        .expect("task creation should succeed");
    for id in [archived.id(), buried.id()] {
        service
            .archive(id, teacher, ArchiveOptions::default())
            .await
            .expect("archive should succeed");
    }
    service
        .soft_delete(buried.id(), teacher)
        .await
        .expect("soft delete should succeed");

    let archived_listing = service
        .list_for_owner(teacher, Some(LifecycleStage::Archived))
        .await
        .expect("listing should succeed");
    let deleted_listing = service
        .list_for_owner(teacher, Some(LifecycleStage::Deleted))
        .await
        .expect("listing should succeed");

    assert_eq!(archived_listing.len(), 1);
    assert_eq!(
        archived_listing.first().expect("one archived task").id(),
        archived.id()
    );
    assert_eq!(deleted_listing.len(), 1);
    assert_eq!(
        deleted_listing.first().expect("one deleted task").id(),
        buried.id()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn hard_delete_cascades_submission_rows() {
    let Some(pool) = test_pool() else { return };
    let service = service_over(&pool);
    let teacher = TeacherId::new();

    let created = service
        .create(CreateTaskRequest::new(teacher, "Cascade target"))
        .await
        .expect("task creation should succeed");
    seed_submission(&pool, created.id());
    seed_submission(&pool, created.id());

    let removed = service
        .hard_delete(created.id(), teacher)
        .await
        .expect("hard delete should succeed");

    assert_eq!(removed, 2);
    assert_eq!(count_submissions(&pool, created.id()), 0);
    assert!(matches!(
        service.get(created.id()).await,
        Err(TaskLifecycleError::NotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn expired_deletions_are_found_by_the_sweep_query() {
    let Some(pool) = test_pool() else { return };
    let repository = PostgresTaskRepository::new(pool.clone());
    let teacher = TeacherId::new();
    let now = Utc::now();

    let past = FixedClock(now - TimeDelta::days(40));
    let mut aged = Task::new(
        teacher,
        TaskDetails::new("Aged in the bin").expect("valid title"),
        &past,
    );
    aged.soft_delete(teacher, &past)
        .expect("soft delete should succeed");
    repository.store(&aged).await.expect("store should succeed");

    let cutoff = now - TimeDelta::days(30);
    let expired = repository
        .find_deleted_before(cutoff)
        .await
        .expect("query should succeed");

    assert!(expired.iter().any(|task| task.id() == aged.id()));
    repository
        .delete_hard(aged.id())
        .await
        .expect("cleanup should succeed");
}
