//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use classtask::assignment::domain::{LifecycleStage, Task, TaskDomainError};
use classtask::assignment::services::TaskLifecycleError;
use rstest_bdd_macros::then;

fn fetch_task(world: &TaskLifecycleWorld) -> Result<Task, eyre::Report> {
    let task_id = world.task_id()?;
    run_async(world.service.get(task_id)).map_err(|err| eyre::eyre!("task lookup failed: {err}"))
}

#[then("the task is archived")]
fn task_is_archived(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task = fetch_task(world)?;
    eyre::ensure!(task.stage() == LifecycleStage::Archived, "task not archived");
    Ok(())
}

#[then("the task is active")]
fn task_is_active(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task = fetch_task(world)?;
    eyre::ensure!(task.stage() == LifecycleStage::Active, "task not active");
    Ok(())
}

#[then("the task history has {count:usize} entries")]
fn task_history_has_entries(
    world: &TaskLifecycleWorld,
    count: usize,
) -> Result<(), eyre::Report> {
    let task = fetch_task(world)?;
    eyre::ensure!(
        task.history().len() == count,
        "expected {count} history entries, found {}",
        task.history().len()
    );
    Ok(())
}

#[then("the last operation fails because the task is already archived")]
fn last_operation_failed_already_archived(
    world: &TaskLifecycleWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::AlreadyArchived(_)
        ))
    ) {
        return Err(eyre::eyre!("expected AlreadyArchived error, got {result:?}"));
    }
    Ok(())
}

#[then("the last operation fails with an ownership error")]
fn last_operation_failed_ownership(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::NotOwner { .. }))
    ) {
        return Err(eyre::eyre!("expected NotOwner error, got {result:?}"));
    }
    Ok(())
}

#[then("the archived listing does not contain the task")]
fn archived_listing_excludes_task(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let archived = run_async(
        world
            .service
            .list_for_owner(world.teacher, Some(LifecycleStage::Archived)),
    )
    .map_err(|err| eyre::eyre!("listing failed: {err}"))?;

    eyre::ensure!(
        archived.iter().all(|task| task.id() != task_id),
        "deleted task leaked into the archived listing"
    );
    Ok(())
}

#[then("the deleted listing contains the task")]
fn deleted_listing_contains_task(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let deleted = run_async(
        world
            .service
            .list_for_owner(world.teacher, Some(LifecycleStage::Deleted)),
    )
    .map_err(|err| eyre::eyre!("listing failed: {err}"))?;

    eyre::ensure!(
        deleted.iter().any(|task| task.id() == task_id),
        "deleted task missing from the deleted listing"
    );
    Ok(())
}
