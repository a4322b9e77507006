//! Demo service subsystem.
//!
//! # Data Flow
//! ```text
//! Demo::new(ar_node, mysql)
//!     → validate config, parse DSN, load students, build node client
//! Service::start
//!     → bind listener → spawn HTTP server + node monitor
//! Service::stop
//!     → Shutdown::trigger → await both tasks
//! ```

pub mod error;
pub mod service;

pub use error::DemoError;
pub use service::Demo;
