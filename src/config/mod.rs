//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command-line flags / environment variables
//!     → schema.rs (clap derive: flag > env > default)
//!     → DemoConfig (immutable once parsed)
//!     → handed to the demo service constructor
//!     → validation.rs + dsn.rs (semantic checks, at construction)
//! ```
//!
//! # Design Decisions
//! - The lifecycle shell never validates; the service rejects bad values
//! - All fields have defaults except the optional seed and metrics settings
//! - Validation separates syntactic (clap) from semantic checks

pub mod dsn;
pub mod schema;
pub mod validation;

pub use dsn::{Dsn, DsnError};
pub use schema::{DemoConfig, LogFormat, DEFAULT_AR_NODE, DEFAULT_LISTEN, DEFAULT_MYSQL};
pub use validation::{validate_config, ValidationError, ValidationErrors};
