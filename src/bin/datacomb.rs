//! Read-only command-line browser for the task marketplace.
//!
//! Usage:
//!
//! ```text
//! datacomb tasks [--tag <tag>]
//! datacomb task <author> <permlink>
//! datacomb profile <account>
//! ```
//!
//! Output is JSON on stdout. Logs go to stderr and are filtered with
//! `RUST_LOG`. Defaults come from `DATACOMB_NODES`, `DATACOMB_TAG`,
//! `DATACOMB_PAGE_SIZE` and `DATACOMB_TIMEOUT_SECS`; flags override them.

use clap::{Parser, Subcommand};
use datacomb::account::{domain::ReputationTier, services::fetch_profile};
use datacomb::chain::{
    adapters::CondenserRpcStore,
    domain::{AccountName, PostRef},
};
use datacomb::comment::Submission;
use datacomb::config::MarketplaceConfig;
use datacomb::task::{
    codec::TaskCodec,
    services::{TaskDetails, TaskDetailsService, TaskDiscoveryService},
};
use serde_json::{Value, json};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum CliError {
    #[error("no task found at {0}")]
    TaskNotFound(PostRef),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "datacomb", version, about = "Browse DataComb tasks on the chain")]
struct Args {
    /// Chain node URL; repeat to list several, tried in order.
    #[arg(long = "node", global = true)]
    nodes: Vec<String>,

    /// Posts fetched per discovery query.
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the most recent tasks under a tag.
    Tasks {
        /// Tag to list; defaults to the marketplace tag.
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show one task with its submissions and discussion.
    Task {
        /// Task author.
        author: String,
        /// Task permlink.
        permlink: String,
    },
    /// Show an account profile.
    Profile {
        /// Account name.
        account: String,
    },
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;
    let output = runtime.block_on(run(args.command, config))?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn build_config(args: &Args) -> Result<MarketplaceConfig, BoxError> {
    let mut config = MarketplaceConfig::from_env()?;
    if !args.nodes.is_empty() {
        config = config.with_nodes(args.nodes.iter().cloned())?;
    }
    if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size)?;
    }
    if let Some(secs) = args.timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    Ok(config)
}

async fn run(command: Command, config: MarketplaceConfig) -> Result<Value, BoxError> {
    let store = Arc::new(CondenserRpcStore::new(&config)?);
    match command {
        Command::Tasks { tag } => {
            let discovery = TaskDiscoveryService::new(store, &config);
            let records = match tag {
                Some(custom) => discovery.discover(&custom).await?,
                None => discovery.discover_marketplace().await?,
            };
            Ok(serde_json::to_value(records)?)
        }
        Command::Task { author, permlink } => {
            let target = PostRef::from_parts(&author, &permlink)?;
            let details = TaskDetailsService::new(store, TaskCodec::from_config(&config))
                .load(&target)
                .await?
                .ok_or(CliError::TaskNotFound(target))?;
            Ok(details_json(&details))
        }
        Command::Profile { account } => {
            let name = AccountName::new(account)?;
            let profile = fetch_profile(store.as_ref(), &name).await?;
            let tier = ReputationTier::from_score(profile.reputation);
            Ok(json!({ "profile": profile, "tier": tier }))
        }
    }
}

fn details_json(details: &TaskDetails) -> Value {
    json!({
        "task": details.task,
        "submissions": details
            .replies
            .submissions
            .iter()
            .map(submission_json)
            .collect::<Vec<_>>(),
        "discussion": details
            .replies
            .discussion
            .iter()
            .map(|reply| json!({
                "author": reply.author,
                "permlink": reply.permlink,
                "body": reply.body,
                "created": reply.created,
            }))
            .collect::<Vec<_>>(),
    })
}

fn submission_json(submission: &Submission) -> Value {
    json!({
        "author": submission.author(),
        "permlink": submission.permlink(),
        "work": submission.work_text(),
        "voters": submission.voter_count(),
        "created_at": submission.created_at(),
    })
}
