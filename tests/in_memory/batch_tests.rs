//! Multi-task flows through the batch service.

use super::helpers::{Stack, create_task, stack};
use classtask::assignment::domain::{ArchiveOptions, LifecycleStage};
use classtask::assignment::services::BatchOperation;
use rstest::rstest;

/// End-of-term flow: archive the term's worksheets in one call, move two of
/// them to the recycle bin, then change course on one and restore it.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn end_of_term_batch_flow(stack: Stack) {
    let worksheets = [
        create_task(&stack, "Week 1 worksheet").await,
        create_task(&stack, "Week 2 worksheet").await,
        create_task(&stack, "Week 3 worksheet").await,
        create_task(&stack, "Week 4 worksheet").await,
    ];

    let archived = stack
        .batch
        .batch_apply(
            &worksheets,
            BatchOperation::Archive(ArchiveOptions::new(false)),
            stack.teacher,
        )
        .await
        .expect("batch archive should succeed");
    assert_eq!(archived.success_count, 4);

    let to_delete = [worksheets[0], worksheets[1]];
    let deleted = stack
        .batch
        .batch_apply(&to_delete, BatchOperation::SoftDelete, stack.teacher)
        .await
        .expect("batch soft delete should succeed");
    assert_eq!(deleted.success_count, 2);

    let restored = stack
        .batch
        .batch_apply(&[worksheets[0]], BatchOperation::Restore, stack.teacher)
        .await
        .expect("batch restore should succeed");
    assert_eq!(restored.success_count, 1);

    let archived_now = stack
        .lifecycle
        .list_for_owner(stack.teacher, Some(LifecycleStage::Archived))
        .await
        .expect("listing should succeed");
    let deleted_now = stack
        .lifecycle
        .list_for_owner(stack.teacher, Some(LifecycleStage::Deleted))
        .await
        .expect("listing should succeed");
    assert_eq!(archived_now.len(), 3);
    assert_eq!(deleted_now.len(), 1);
}

/// A batch that mixes fresh and already-archived tasks reports the repeat
/// offenders individually while archiving the rest.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeat_archive_in_a_batch_is_reported_per_item(stack: Stack) {
    let tasks = [
        create_task(&stack, "Quiz 1").await,
        create_task(&stack, "Quiz 2").await,
    ];
    stack
        .lifecycle
        .archive(tasks[0], stack.teacher, ArchiveOptions::default())
        .await
        .expect("archive should succeed");

    let outcome = stack
        .batch
        .batch_apply(
            &tasks,
            BatchOperation::Archive(ArchiveOptions::default()),
            stack.teacher,
        )
        .await
        .expect("batch should succeed");

    assert_eq!(outcome.success_count, 1);
    assert_eq!(outcome.total_count, 2);
    let first = outcome.results.first().expect("result entry");
    assert_eq!(first.task_id, tasks[0]);
    assert!(!first.success);
    let second = outcome.results.get(1).expect("result entry");
    assert_eq!(second.task_id, tasks[1]);
    assert!(second.success);
    assert_eq!(second.message, "archived");
}
