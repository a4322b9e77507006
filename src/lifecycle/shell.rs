//! Startup and shutdown sequencing.
//!
//! # Responsibilities
//! - Start the service exactly once, without waiting on it
//! - Suspend on a single termination signal
//! - Stop the service exactly once, after start returned
//!
//! # Design Decisions
//! - Fail fast: a start or stop error is fatal and propagated
//! - No timeout on stop; a hung stop hangs the process
//! - The shell reads nothing from the service while waiting

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;

use thiserror::Error;

use crate::lifecycle::signals::{Signal, SignalReceiver};

/// Error reported by a service's start or stop operation.
#[derive(Debug)]
pub struct ServiceError(Box<dyn StdError + Send + Sync>);

impl ServiceError {
    pub fn new(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl StdError for ServiceError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// Capability the shell needs from the service it runs.
pub trait Service: Send {
    /// Begin the service's work and return immediately.
    fn start(&mut self) -> Result<(), ServiceError>;

    /// Stop the service's work and release its resources.
    fn stop(&mut self) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

/// Where the shell is in its lifecycle. There are no backward transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Running,
    ShuttingDown,
    Terminated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Created => "created",
            Phase::Running => "running",
            Phase::ShuttingDown => "shutting_down",
            Phase::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by [`Shell::run`].
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("service failed to start: {0}")]
    Start(#[source] ServiceError),

    #[error("service failed to stop: {0}")]
    Stop(#[source] ServiceError),

    #[error("shell already ran (phase: {0})")]
    AlreadyRan(Phase),
}

/// Owns a service handle and drives it through its lifecycle.
pub struct Shell<S> {
    service: S,
    phase: Phase,
}

impl<S: Service> Shell<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            phase: Phase::Created,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Start the service, wait for one termination signal, then stop it.
    ///
    /// Returns the signal that ended the run, or `None` when the signal
    /// source closed without delivering one; that case is treated as a
    /// termination request as well.
    pub async fn run(&mut self, mut signals: SignalReceiver) -> Result<Option<Signal>, ShellError> {
        if self.phase != Phase::Created {
            return Err(ShellError::AlreadyRan(self.phase));
        }

        if let Err(e) = self.service.start() {
            tracing::error!(error = %e, "Service failed to start");
            self.transition(Phase::Terminated);
            return Err(ShellError::Start(e));
        }
        self.transition(Phase::Running);

        let signal = signals.recv().await;
        match signal {
            Some(signal) => tracing::info!(signal = %signal, "Termination requested"),
            None => tracing::warn!("Signal source closed, shutting down"),
        }
        // Later signals are not consumed; at most one shutdown runs.
        drop(signals);

        self.transition(Phase::ShuttingDown);
        let stopped = self.service.stop().await;
        self.transition(Phase::Terminated);

        stopped.map_err(ShellError::Stop)?;
        Ok(signal)
    }

    fn transition(&mut self, next: Phase) {
        tracing::debug!(from = %self.phase, to = %next, "Lifecycle transition");
        self.phase = next;
    }
}
