//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout (compact or JSON lines)
//!     → Prometheus scrape endpoint (when --metrics-addr is set)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
