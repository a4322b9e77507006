//! Errors raised by the demo service.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::{ValidationError, ValidationErrors};
use crate::lifecycle::ServiceError;
use crate::node::NodeError;
use crate::students::MapperError;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid configuration: {}", ValidationErrors(.0.as_slice()))]
    InvalidConfig(Vec<ValidationError>),

    #[error(transparent)]
    Students(#[from] MapperError),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("demo service must be started from within a Tokio runtime")]
    NoRuntime,

    #[error("demo service already started")]
    AlreadyStarted,

    #[error("demo service not started")]
    NotStarted,

    #[error("demo service already stopped")]
    AlreadyStopped,

    #[error("background task failed: {0}")]
    TaskFailed(String),
}

impl From<DemoError> for ServiceError {
    fn from(err: DemoError) -> Self {
        ServiceError::new(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_lists_every_problem() {
        let err = DemoError::InvalidConfig(vec![
            ValidationError::ZeroDuration("probe interval"),
            ValidationError::InvalidListenAddress("nowhere".into()),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid configuration: probe interval must be greater than zero, listen address 'nowhere' is not a socket address"
        );
    }
}
