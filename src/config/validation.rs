//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap handles syntactic)
//! - Check the node endpoint is an absolute HTTP(S) URL
//! - Check bind addresses and value ranges
//! - Check the DSN parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: DemoConfig → Result<(), Vec<ValidationError>>
//! - Runs inside service construction, not in the lifecycle shell

use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::dsn::{Dsn, DsnError};
use crate::config::schema::DemoConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ar_node '{value}' is not a valid URL: {reason}")]
    InvalidNodeUrl { value: String, reason: String },

    #[error("ar_node '{0}' must use http or https")]
    UnsupportedNodeScheme(String),

    #[error("listen address '{0}' is not a socket address")]
    InvalidListenAddress(String),

    #[error("metrics address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error(transparent)]
    Dsn(#[from] DsnError),
}

/// Wrapper for displaying a list of validation errors on one line.
pub struct ValidationErrors<'a>(pub &'a [ValidationError]);

impl fmt::Display for ValidationErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &DemoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.ar_node) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::UnsupportedNodeScheme(config.ar_node.clone()));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidNodeUrl {
            value: config.ar_node.clone(),
            reason: e.to_string(),
        }),
    }

    if config.listen.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidListenAddress(config.listen.clone()));
    }

    if let Some(addr) = &config.metrics_addr {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if config.probe_interval_secs == 0 {
        errors.push(ValidationError::ZeroDuration("probe interval"));
    }
    if config.probe_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("probe timeout"));
    }
    if config.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("request timeout"));
    }

    if let Err(e) = Dsn::parse(&config.mysql) {
        errors.push(e.into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
