//! Arweave node monitoring subsystem.
//!
//! # Data Flow
//! ```text
//! monitor.rs (timer / backoff)
//!     → client.rs (GET {ar_node}/info)
//!     → NodeState (latest snapshot, failure count)
//!     → http /info handler
//! ```

pub mod client;
pub mod monitor;

pub use client::{NodeClient, NodeError, NodeInfo};
pub use monitor::{NodeMonitor, NodeState};
