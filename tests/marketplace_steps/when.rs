//! When steps for task marketplace BDD scenarios.

use super::world::{MarketplaceWorld, publish_pending, run_async};
use datacomb::chain::domain::AccountName;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the requester publishes the task")]
fn requester_publishes_task(world: &mut MarketplaceWorld) -> Result<(), eyre::Report> {
    publish_pending(world)
}

#[when("the marketplace is browsed")]
fn browse_marketplace(world: &mut MarketplaceWorld) {
    world.last_discovery_result = Some(run_async(world.discovery.discover_marketplace()));
}

#[when(r#"worker "{worker}" submits "{work}""#)]
fn worker_submits(
    world: &mut MarketplaceWorld,
    worker: String,
    work: String,
) -> Result<(), eyre::Report> {
    let task = world
        .published_task
        .clone()
        .ok_or_else(|| eyre::eyre!("missing published task in scenario world"))?;
    let account = AccountName::new(worker).wrap_err("construct worker account")?;
    world.last_action_result = Some(run_async(world.actions.submit_work(&account, &task, &work)));
    Ok(())
}

#[when("the task details are loaded")]
fn load_task_details(world: &mut MarketplaceWorld) -> Result<(), eyre::Report> {
    let task = world
        .published_task
        .clone()
        .ok_or_else(|| eyre::eyre!("missing published task in scenario world"))?;
    world.last_details_result = Some(run_async(world.details.load(&task)));
    Ok(())
}
