//! In-memory integration tests for the task marketplace flow.

use super::helpers::{Marketplace, account, labeling_draft, marketplace};
use datacomb::{
    action::{
        adapters::SignerCall,
        domain::{APPROVE_WEIGHT, REJECT_WEIGHT},
        ports::SignerError,
        services::ActionError,
    },
    chain::{
        domain::{ChainPost, PostRef},
        ports::ChainStoreError,
    },
    comment::SubmissionStatus,
    messages,
    task::{
        domain::{TaskDraft, TaskStatus, dedup_by_identity},
        services::TaskDiscoveryError,
    },
};
use rstest::rstest;

/// Publishes the labeling draft as `alice` and returns its post reference.
async fn publish_labeling_task(market: &Marketplace) -> Result<PostRef, eyre::Report> {
    let receipt = market
        .actions
        .publish_task(&account("alice")?, labeling_draft())
        .await?;
    eyre::ensure!(receipt.message == messages::TASK_CREATED, "unexpected receipt");
    eyre::ensure!(
        receipt.notice == Some(messages::PROPAGATION_NOTICE),
        "publish receipt should warn about propagation delay"
    );
    Ok(PostRef::from_parts("alice", &receipt.permlink)?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn published_task_is_discovered_with_its_payload(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let task_ref = publish_labeling_task(&marketplace).await?;

    let tasks = marketplace.discovery.discover_marketplace().await?;

    eyre::ensure!(tasks.len() == 1, "expected one task, found {}", tasks.len());
    let task = tasks
        .first()
        .ok_or_else(|| eyre::eyre!("expected a discovered task"))?;
    assert_eq!(task.title, "Label Cats");
    assert_eq!(task.reward, "5 HIVE");
    assert_eq!(task.requester, "alice");
    assert_eq!(task.status, TaskStatus::Open);
    assert_eq!(task.max_submissions.get(), 3);
    assert_eq!(task.instructions.as_deref(), Some("Draw a box around each cat."));
    assert_eq!(task.permlink.as_deref(), Some(task_ref.permlink().as_str()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn discovery_lists_newest_task_first(marketplace: Marketplace) -> Result<(), eyre::Report> {
    let requester = account("alice")?;
    marketplace
        .actions
        .publish_task(&requester, labeling_draft())
        .await?;
    marketplace
        .actions
        .publish_task(
            &requester,
            TaskDraft::new(
                "Transcribe Receipts",
                "Type out each receipt total.",
                "2 HBD",
                "Text Annotation",
            ),
        )
        .await?;

    let titles: Vec<String> = marketplace
        .discovery
        .discover_marketplace()
        .await?
        .into_iter()
        .map(|task| task.title)
        .collect();

    assert_eq!(titles, vec!["Transcribe Receipts", "Label Cats"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_posts_under_the_tag_are_synthesized(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    marketplace.chain.publish(ChainPost {
        author: "carol".to_owned(),
        permlink: "my-dataset".to_owned(),
        parent_permlink: "datacomb33".to_owned(),
        title: "Need help with my dataset".to_owned(),
        body: "Looking for volunteers.".to_owned(),
        json_metadata: r#"{"tags":["datacomb33"]}"#.to_owned(),
        created: "2024-05-03T09:30:00".to_owned(),
        ..ChainPost::default()
    })?;

    let tasks = marketplace.discovery.discover_marketplace().await?;

    let task = tasks
        .first()
        .ok_or_else(|| eyre::eyre!("expected a synthesized task"))?;
    assert_eq!(task.id, "my-dataset");
    assert_eq!(task.title, "Need help with my dataset");
    assert_eq!(task.requester, "carol");
    assert_eq!(task.reward, "0 HIVE");
    assert_eq!(task.category, "Other");
    assert_eq!(task.description, "Looking for volunteers....");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submissions_are_separated_from_discussion(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let task_ref = publish_labeling_task(&marketplace).await?;
    let submitted = marketplace
        .actions
        .submit_work(&account("bob")?, &task_ref, "https://files.example/labels.json")
        .await?;
    let replied = marketplace
        .actions
        .reply(&account("carol")?, &task_ref, "Are sketches allowed?")
        .await?;
    assert_eq!(submitted.message, messages::WORK_SUBMITTED);
    assert_eq!(replied.message, messages::COMMENT_POSTED);

    let details = marketplace
        .details
        .load(&task_ref)
        .await?
        .ok_or_else(|| eyre::eyre!("published task should load"))?;

    assert_eq!(details.task.title, "Label Cats");
    assert_eq!(details.replies.submissions.len(), 1);
    assert_eq!(details.replies.discussion.len(), 1);
    let submission = details
        .replies
        .submissions
        .first()
        .ok_or_else(|| eyre::eyre!("expected a submission"))?;
    assert_eq!(submission.author(), "bob");
    assert_eq!(submission.permlink(), submitted.permlink);
    assert!(submission.work_text().starts_with("https://files.example/labels.json"));
    assert_eq!(submission.status(), SubmissionStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn validator_votes_are_counted_per_voter(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let task_ref = publish_labeling_task(&marketplace).await?;
    let submitted = marketplace
        .actions
        .submit_work(&account("bob")?, &task_ref, "labels.json")
        .await?;
    let submission_ref = PostRef::from_parts("bob", &submitted.permlink)?;

    marketplace
        .actions
        .vote(&account("alice")?, &submission_ref, APPROVE_WEIGHT)
        .await?;
    marketplace
        .actions
        .vote(&account("dave")?, &submission_ref, REJECT_WEIGHT)
        .await?;
    let receipt = marketplace
        .actions
        .vote(&account("alice")?, &submission_ref, REJECT_WEIGHT)
        .await?;
    assert_eq!(receipt.message, messages::VOTE_SUCCESS);

    let details = marketplace
        .details
        .load(&task_ref)
        .await?
        .ok_or_else(|| eyre::eyre!("published task should load"))?;
    let submission = details
        .replies
        .submissions
        .first()
        .ok_or_else(|| eyre::eyre!("expected a submission"))?;

    assert_eq!(submission.voter_count(), 2);
    assert!(
        submission
            .votes()
            .iter()
            .all(|vote| vote.percent == REJECT_WEIGHT)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn vote_on_missing_reply_surfaces_rejection(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    let missing = PostRef::from_parts("bob", "re-nothing-here")?;

    let result = marketplace
        .actions
        .vote(&account("alice")?, &missing, APPROVE_WEIGHT)
        .await;

    assert!(matches!(result, Err(ActionError::Rejected { .. })));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_signer_publishes_nothing(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    marketplace
        .signer
        .fail_with(SignerError::transport(std::io::Error::other("socket closed")))?;

    let result = marketplace
        .actions
        .publish_task(&account("alice")?, labeling_draft())
        .await;

    let Err(error) = result else {
        eyre::bail!("expected publish to fail");
    };
    assert!(matches!(error, ActionError::Network(_)));
    assert_eq!(error.to_string(), messages::NETWORK_ERROR);
    assert!(matches!(
        marketplace.signer.calls()?.as_slice(),
        [SignerCall::Broadcast(_)]
    ));
    assert!(marketplace.discovery.discover_marketplace().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outage_fails_discovery_without_partial_results(
    marketplace: Marketplace,
) -> Result<(), eyre::Report> {
    publish_labeling_task(&marketplace).await?;
    marketplace.chain.simulate_outage("node offline")?;

    let result = marketplace.discovery.discover_marketplace().await;

    assert!(matches!(
        result,
        Err(TaskDiscoveryError::Store(ChainStoreError::Unavailable(_)))
    ));

    marketplace.chain.restore()?;
    let recovered = dedup_by_identity(marketplace.discovery.discover_marketplace().await?);
    assert_eq!(recovered.len(), 1);
    Ok(())
}
