//! Given steps for archiving sweep BDD scenarios.

use super::world::ArchiveSweepWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskkeeper::task::{
    domain::{TaskOrigin, TaskPriority},
    services::CreateTaskRequest,
};

#[given("a tracker with an empty store")]
fn empty_tracker(world: &mut ArchiveSweepWorld) -> Result<(), eyre::Report> {
    world.registry = world
        .service
        .load_registry()
        .wrap_err("load registry for sweep scenario")?;
    Ok(())
}

#[given("a tracker whose archive cannot be written")]
fn tracker_with_broken_archive(world: &mut ArchiveSweepWorld) -> Result<(), eyre::Report> {
    empty_tracker(world)?;
    world.store.break_archive();
    Ok(())
}

#[given(r#"a "{priority}" priority task titled "{title}""#)]
fn task_titled(
    world: &mut ArchiveSweepWorld,
    priority: String,
    title: String,
) -> Result<(), eyre::Report> {
    let parsed_priority = TaskPriority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let task = world
        .service
        .create_task(
            &mut world.registry,
            CreateTaskRequest::new(title, parsed_priority, TaskOrigin::Email),
        )
        .wrap_err("create task for sweep scenario")?;
    world.last_task = Some(task.id());
    Ok(())
}

#[given("the task has been completed")]
fn task_completed(world: &mut ArchiveSweepWorld) -> Result<(), eyre::Report> {
    let id = world
        .last_task
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    world
        .service
        .complete_task(&mut world.registry, id)
        .wrap_err("complete task in scenario setup")?;
    Ok(())
}

#[given("the task has been deleted")]
fn task_deleted(world: &mut ArchiveSweepWorld) -> Result<(), eyre::Report> {
    let id = world
        .last_task
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    world
        .service
        .delete_task(&mut world.registry, id)
        .wrap_err("delete task in scenario setup")?;
    Ok(())
}
