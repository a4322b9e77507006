//! Periodic node probing.
//!
//! # Responsibilities
//! - Probe the node on a fixed interval
//! - Back off after consecutive failures
//! - Publish the latest snapshot for the HTTP layer

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use tokio::time;

use crate::lifecycle::ShutdownListener;
use crate::node::client::{NodeClient, NodeInfo};
use crate::observability::metrics::{self, ProbeOutcome};
use crate::resilience::calculate_backoff;

/// First retry delay after a failed probe.
const BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Latest known node state, shared with request handlers.
#[derive(Debug, Default)]
pub struct NodeState {
    latest: ArcSwapOption<NodeInfo>,
    failures: AtomicU32,
}

impl NodeState {
    pub fn latest(&self) -> Option<Arc<NodeInfo>> {
        self.latest.load_full()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.failures.load(Ordering::Relaxed)
    }
}

pub struct NodeMonitor {
    client: NodeClient,
    interval: Duration,
    state: Arc<NodeState>,
}

impl NodeMonitor {
    pub fn new(client: NodeClient, interval: Duration) -> Self {
        Self {
            client,
            interval,
            state: Arc::new(NodeState::default()),
        }
    }

    pub fn state(&self) -> Arc<NodeState> {
        self.state.clone()
    }

    /// Probe until shutdown is requested. The first probe runs immediately.
    pub async fn run(self, mut shutdown: ShutdownListener) {
        tracing::info!(
            url = %self.client.info_url(),
            interval_secs = self.interval.as_secs(),
            "Node monitor starting"
        );

        loop {
            let delay = tokio::select! {
                _ = shutdown.wait() => break,
                delay = self.probe() => delay,
            };

            tokio::select! {
                _ = shutdown.wait() => break,
                _ = time::sleep(delay) => {}
            }
        }

        tracing::info!("Node monitor stopped");
    }

    /// Run one probe and return the delay before the next one.
    async fn probe(&self) -> Duration {
        match self.client.fetch_info().await {
            Ok(info) => {
                let previous = self.state.failures.swap(0, Ordering::Relaxed);
                if previous > 0 {
                    tracing::info!(failures = previous, "Node reachable again");
                }
                tracing::debug!(network = %info.network, height = info.height, peers = info.peers, "Node probe ok");

                metrics::record_probe(ProbeOutcome::Success);
                metrics::record_node_height(info.height);
                self.state.latest.store(Some(Arc::new(info)));
                self.interval
            }
            Err(e) => {
                let failures = self.state.failures.fetch_add(1, Ordering::Relaxed) + 1;
                let delay = calculate_backoff(failures, BACKOFF_BASE, self.interval);
                tracing::warn!(error = %e, failures, retry_in = ?delay, "Node probe failed");

                metrics::record_probe(ProbeOutcome::Failure);
                delay
            }
        }
    }
}
