//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shell (shell.rs):
//!     Created → start() → Running
//!     Running → one signal → ShuttingDown
//!     ShuttingDown → stop() returns → Terminated
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → single-slot channel → Shell
//!
//! Shutdown (shutdown.rs):
//!     Service::stop → broadcast → server and monitor tasks exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: construct, start, then wait for a signal
//! - Signals are only awaited after start returned
//! - Only one termination request is ever consumed

pub mod shell;
pub mod shutdown;
pub mod signals;

pub use shell::{Phase, Service, ServiceError, Shell, ShellError};
pub use shutdown::{Shutdown, ShutdownListener};
pub use signals::{Signal, SignalNotifier, SignalReceiver};
