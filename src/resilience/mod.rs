//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Node probe fails:
//!     → backoff.rs (delay grows with consecutive failures)
//!     → next probe after the delay instead of the regular interval
//! ```
//!
//! # Design Decisions
//! - Every external call has a deadline (probe timeout, request timeout)
//! - Backoff is capped by the regular probe interval

pub mod backoff;

pub use backoff::calculate_backoff;
