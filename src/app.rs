//! Top-level run routine.
//!
//! Glues configuration, service construction and the lifecycle shell, and
//! reduces every failure to one [`AppError`] for `main` to report.

use std::fmt::Display;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::DemoConfig;
use crate::demo::Demo;
use crate::lifecycle::{signals, Service, Shell, ShellError, SignalReceiver};
use crate::observability::metrics;

/// Fatal error of the run routine. Always ends the process with status 1.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to register signal handlers: {0}")]
    Signals(#[source] std::io::Error),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(String),

    #[error("failed to construct service: {0}")]
    Construct(String),

    #[error(transparent)]
    Shell(#[from] ShellError),
}

/// Run the demo service until SIGINT or SIGTERM.
///
/// Signal handlers are installed before the startup line is printed, so a
/// signal sent once the line is visible always ends in a graceful stop.
pub async fn run(config: DemoConfig) -> Result<(), AppError> {
    let signals = signals::listen().map_err(AppError::Signals)?;

    // Printed unconditionally; the log filter must not hide the version.
    println!("{} {}", crate::NAME, crate::VERSION);
    tracing::info!(name = crate::NAME, version = crate::VERSION, "Service starting");

    if let Some(addr) = &config.metrics_addr {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| AppError::Metrics(format!("invalid address '{}': {}", addr, e)))?;
        metrics::init_metrics(addr).map_err(|e| AppError::Metrics(e.to_string()))?;
    }

    run_with(&config, Demo::from_config, signals).await
}

/// Construct a service with `build`, then drive it with the lifecycle shell.
///
/// Construction failure returns before the service exists, so neither start
/// nor stop is ever invoked.
pub async fn run_with<S, E, F>(config: &DemoConfig, build: F, signals: SignalReceiver) -> Result<(), AppError>
where
    S: Service,
    E: Display,
    F: FnOnce(&DemoConfig) -> Result<S, E>,
{
    let service = build(config).map_err(|e| AppError::Construct(e.to_string()))?;

    let mut shell = Shell::new(service);
    shell.run(signals).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
