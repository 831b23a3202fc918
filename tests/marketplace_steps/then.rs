//! Then steps for task marketplace BDD scenarios.

use super::world::MarketplaceWorld;
use datacomb::{
    chain::ports::ChainStoreError,
    task::{domain::TaskRecord, services::TaskDiscoveryError},
};
use rstest_bdd_macros::then;

fn listed_tasks(world: &MarketplaceWorld) -> Result<&[TaskRecord], eyre::Report> {
    let result = world
        .last_discovery_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing discovery result in scenario world"))?;
    result
        .as_deref()
        .map_err(|err| eyre::eyre!("unexpected discovery failure: {err}"))
}

#[then(r#"a task titled "{title}" is listed for "{requester}""#)]
fn task_listed_for(
    world: &MarketplaceWorld,
    title: String,
    requester: String,
) -> Result<(), eyre::Report> {
    let tasks = listed_tasks(world)?;
    if !tasks
        .iter()
        .any(|task| task.title == title && task.requester == requester)
    {
        return Err(eyre::eyre!(
            "expected task '{title}' by {requester}, found {tasks:?}"
        ));
    }
    Ok(())
}

#[then(r#"the listed task has reward "{reward}""#)]
fn listed_task_reward(world: &MarketplaceWorld, reward: String) -> Result<(), eyre::Report> {
    let task = listed_tasks(world)?
        .first()
        .ok_or_else(|| eyre::eyre!("expected at least one listed task"))?;
    if task.reward != reward {
        return Err(eyre::eyre!(
            "expected reward {reward}, found {}",
            task.reward
        ));
    }
    Ok(())
}

#[then(r#"the task has {count:usize} submission from "{worker}""#)]
fn task_has_submissions(
    world: &MarketplaceWorld,
    count: usize,
    worker: String,
) -> Result<(), eyre::Report> {
    let details = world
        .last_details_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing details result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected details failure: {err}"))?
        .as_ref()
        .ok_or_else(|| eyre::eyre!("published task was not found"))?;

    let submissions = &details.replies.submissions;
    if submissions.len() != count {
        return Err(eyre::eyre!(
            "expected {count} submissions, found {}",
            submissions.len()
        ));
    }
    if !submissions
        .iter()
        .all(|submission| submission.author() == worker)
    {
        return Err(eyre::eyre!("expected every submission to come from {worker}"));
    }
    Ok(())
}

#[then("discovery fails with an unavailable store error")]
fn discovery_fails_unavailable(world: &MarketplaceWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_discovery_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing discovery result in scenario world"))?;
    if !matches!(
        result,
        Err(TaskDiscoveryError::Store(ChainStoreError::Unavailable(_)))
    ) {
        return Err(eyre::eyre!(
            "expected unavailable store error, got {result:?}"
        ));
    }
    Ok(())
}
