//! Condenser JSON-RPC adapter for public chain nodes.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::chain::{
    domain::{AccountName, ChainAccount, ChainPost, PostRef},
    ports::{ChainStore, ChainStoreError, ChainStoreResult, DiscussionQuery},
};
use crate::config::MarketplaceConfig;

const USER_AGENT: &str = concat!("datacomb/", env!("CARGO_PKG_VERSION"));

/// Chain store backed by the `condenser_api` JSON-RPC namespace.
///
/// Nodes are tried in configured order. A node that cannot be reached hands
/// the same request to the next node; an RPC error or malformed response
/// from a reachable node is returned as-is.
#[derive(Debug)]
pub struct CondenserRpcStore {
    client: Client,
    nodes: Vec<String>,
    next_id: AtomicU64,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a, P> {
    jsonrpc: &'static str,
    method: &'a str,
    params: P,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize)]
struct DiscussionParams<'a> {
    tag: &'a str,
    limit: u32,
}

impl CondenserRpcStore {
    /// Creates a store over the configured nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ChainStoreError::Unavailable`] when the HTTP client cannot
    /// be constructed.
    pub fn new(config: &MarketplaceConfig) -> ChainStoreResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ChainStoreError::unavailable)?;
        Ok(Self {
            client,
            nodes: config.nodes.clone(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Returns the configured node URLs.
    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    async fn call<P, R>(&self, method: &str, params: &P) -> ChainStoreResult<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let mut last_error = None;
        for node in &self.nodes {
            match self.call_node(node, method, params).await {
                Ok(result) => return Ok(result),
                Err(err @ ChainStoreError::Unavailable(_)) => {
                    warn!(node = %node, method, error = %err, "chain node unavailable");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_error.unwrap_or_else(|| {
            ChainStoreError::unavailable(std::io::Error::other("no chain nodes configured"))
        }))
    }

    async fn call_node<P, R>(&self, node: &str, method: &str, params: &P) -> ChainStoreResult<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };
        debug!(node, method, id = request.id, "calling chain node");

        let response = self
            .client
            .post(node)
            .json(&request)
            .send()
            .await
            .map_err(ChainStoreError::unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChainStoreError::unavailable(std::io::Error::other(format!(
                "HTTP {status} from {node}"
            ))));
        }

        let envelope: RpcResponse<R> = response
            .json()
            .await
            .map_err(ChainStoreError::invalid_response)?;
        match envelope {
            RpcResponse {
                error: Some(error), ..
            } => Err(ChainStoreError::Rpc {
                code: error.code,
                message: error.message,
            }),
            RpcResponse {
                result: Some(result),
                ..
            } => Ok(result),
            RpcResponse { .. } => Err(ChainStoreError::invalid_response(std::io::Error::other(
                format!("{method} returned neither result nor error"),
            ))),
        }
    }
}

#[async_trait]
impl ChainStore for CondenserRpcStore {
    async fn get_account(&self, name: &AccountName) -> ChainStoreResult<Option<ChainAccount>> {
        let accounts: Vec<ChainAccount> = self
            .call("condenser_api.get_accounts", &json!([[name.as_str()]]))
            .await?;
        Ok(accounts.into_iter().next())
    }

    async fn get_discussions_by_created(
        &self,
        query: &DiscussionQuery,
    ) -> ChainStoreResult<Vec<ChainPost>> {
        let params = [DiscussionParams {
            tag: &query.tag,
            limit: query.limit,
        }];
        self.call("condenser_api.get_discussions_by_created", &params)
            .await
    }

    async fn get_content(&self, post_ref: &PostRef) -> ChainStoreResult<Option<ChainPost>> {
        let post: ChainPost = self
            .call(
                "condenser_api.get_content",
                &[post_ref.author().as_str(), post_ref.permlink().as_str()],
            )
            .await?;
        Ok((!post.is_missing()).then_some(post))
    }

    async fn get_content_replies(&self, post_ref: &PostRef) -> ChainStoreResult<Vec<ChainPost>> {
        self.call(
            "condenser_api.get_content_replies",
            &[post_ref.author().as_str(), post_ref.permlink().as_str()],
        )
        .await
    }
}
