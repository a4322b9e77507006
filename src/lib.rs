//! Demo service library.
//!
//! A lifecycle shell that starts the demo service, waits for SIGINT or
//! SIGTERM, and stops it. The service serves student lookups over HTTP and
//! monitors an Arweave node.

pub mod app;
pub mod config;
pub mod demo;
pub mod http;
pub mod lifecycle;
pub mod node;
pub mod observability;
pub mod resilience;
pub mod students;

pub use app::AppError;
pub use config::DemoConfig;
pub use demo::Demo;
pub use lifecycle::{Service, ServiceError, Shell};

/// Program name reported at startup.
pub const NAME: &str = "demo";

/// Version string reported at startup.
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));
