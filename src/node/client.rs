//! HTTP client for an Arweave node.
//!
//! # Responsibilities
//! - Resolve the node's `/info` endpoint from the configured base URL
//! - Fetch and decode the node info document
//! - Enforce a per-request timeout

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Errors from talking to the node.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("invalid node endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("node request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("node returned status {0}")]
    Status(StatusCode),

    #[error("failed to decode node info: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Subset of the document served at `GET /info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfo {
    pub network: String,
    pub version: u64,
    pub release: u64,
    pub height: u64,
    pub current: String,
    pub blocks: u64,
    pub peers: u64,
    pub queue_length: u64,
    pub node_state_latency: u64,
}

/// Client bound to a single node.
#[derive(Debug, Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    info_url: Url,
}

impl NodeClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, NodeError> {
        let info_url = info_url(endpoint)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("demo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(NodeError::Client)?;

        Ok(Self { http, info_url })
    }

    pub fn info_url(&self) -> &Url {
        &self.info_url
    }

    pub async fn fetch_info(&self) -> Result<NodeInfo, NodeError> {
        let response = self
            .http
            .get(self.info_url.clone())
            .send()
            .await
            .map_err(NodeError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NodeError::Status(status));
        }

        response.json::<NodeInfo>().await.map_err(NodeError::Decode)
    }
}

/// `{endpoint}/info`, keeping any path prefix of the endpoint.
fn info_url(endpoint: &str) -> Result<Url, NodeError> {
    let invalid = |source| NodeError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        source,
    };

    let mut base = Url::parse(endpoint).map_err(invalid)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("info").map_err(invalid)
}
