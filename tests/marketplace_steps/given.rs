//! Given steps for task marketplace BDD scenarios.

use super::world::{MarketplaceWorld, publish_pending};
use datacomb::{
    chain::domain::{AccountName, ChainPost, PostRef},
    task::domain::TaskDraft,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a requester "{requester}" with a task titled "{title}""#)]
fn requester_with_task(
    world: &mut MarketplaceWorld,
    requester: String,
    title: String,
) -> Result<(), eyre::Report> {
    world.pending_requester =
        Some(AccountName::new(requester).wrap_err("construct requester account")?);
    world.pending_draft = Some(
        TaskDraft::new(title, "Tag every photo in the set.", "5 HIVE", "Image Labeling")
            .with_instructions("Draw a box around each subject."),
    );
    Ok(())
}

#[given("the task has been published")]
fn task_has_been_published(world: &mut MarketplaceWorld) -> Result<(), eyre::Report> {
    publish_pending(world).wrap_err("publish task for scenario")?;
    if let Some(Err(err)) = &world.last_action_result {
        return Err(eyre::eyre!("unexpected publish failure: {err}"));
    }
    Ok(())
}

#[given(r#"a foreign post by "{author}" at "{permlink}" titled "{title}" under the marketplace tag"#)]
fn foreign_post(
    world: &mut MarketplaceWorld,
    author: String,
    permlink: String,
    title: String,
) -> Result<(), eyre::Report> {
    let post_ref = PostRef::from_parts(&author, &permlink).wrap_err("construct post reference")?;
    world
        .chain
        .publish(ChainPost {
            author: post_ref.author().to_string(),
            permlink: post_ref.permlink().to_string(),
            parent_permlink: "datacomb33".to_owned(),
            title,
            body: "Looking for volunteers.".to_owned(),
            json_metadata: r#"{"tags":["datacomb33"]}"#.to_owned(),
            created: "2024-05-03T09:30:00".to_owned(),
            ..ChainPost::default()
        })
        .wrap_err("publish foreign post")?;
    Ok(())
}

#[given("the store is unavailable")]
fn store_unavailable(world: &mut MarketplaceWorld) -> Result<(), eyre::Report> {
    world
        .chain
        .simulate_outage("node offline")
        .wrap_err("simulate store outage")?;
    Ok(())
}
