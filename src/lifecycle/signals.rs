//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGINT, SIGTERM)
//! - Translate signals into a single-slot termination notification
//! - Drop notifications that arrive while one is still pending
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Capacity 1: the shell consumes at most one termination request
//! - Any other signal keeps the default OS behavior

use std::fmt;

use tokio::sync::mpsc;

/// A termination request delivered by the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// SIGINT / Ctrl-C.
    Interrupt,
    /// SIGTERM, typically from a process supervisor.
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Interrupt => write!(f, "SIGINT"),
            Signal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Writing half of the termination channel.
#[derive(Debug, Clone)]
pub struct SignalNotifier {
    tx: mpsc::Sender<Signal>,
}

impl SignalNotifier {
    /// Offer a signal to the shell.
    ///
    /// Returns `false` when a signal is already pending or the shell is gone;
    /// the offered signal is then dropped, not queued.
    pub fn notify(&self, signal: Signal) -> bool {
        match self.tx.try_send(signal) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::debug!(signal = %signal, "Termination already pending, dropping signal");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }
}

/// Reading half of the termination channel, owned by the shell.
#[derive(Debug)]
pub struct SignalReceiver {
    rx: mpsc::Receiver<Signal>,
}

impl SignalReceiver {
    /// Wait for one termination signal.
    ///
    /// Returns `None` if every notifier was dropped without sending.
    pub async fn recv(&mut self) -> Option<Signal> {
        self.rx.recv().await
    }
}

/// Create a termination channel with a single pending slot.
pub fn channel() -> (SignalNotifier, SignalReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (SignalNotifier { tx }, SignalReceiver { rx })
}

/// Register SIGINT and SIGTERM handlers and forward them into a fresh channel.
///
/// Must be called from within a Tokio runtime. The forwarding task lives until
/// the receiver is dropped.
pub fn listen() -> std::io::Result<SignalReceiver> {
    let (notifier, receiver) = channel();
    forward(notifier)?;
    Ok(receiver)
}

#[cfg(unix)]
fn forward(notifier: SignalNotifier) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                _ = sigint.recv() => Signal::Interrupt,
                _ = sigterm.recv() => Signal::Terminate,
                _ = notifier.tx.closed() => break,
            };
            tracing::info!(signal = %received, "Signal received");
            notifier.notify(received);
        }
    });

    Ok(())
}

#[cfg(not(unix))]
fn forward(notifier: SignalNotifier) -> std::io::Result<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                        break;
                    }
                }
                _ = notifier.tx.closed() => break,
            }
            tracing::info!(signal = %Signal::Interrupt, "Signal received");
            notifier.notify(Signal::Interrupt);
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_pending_signal_is_dropped() {
        let (notifier, mut receiver) = channel();

        assert!(notifier.notify(Signal::Terminate));
        assert!(!notifier.notify(Signal::Interrupt));

        assert_eq!(receiver.recv().await, Some(Signal::Terminate));
    }

    #[tokio::test]
    async fn test_slot_frees_after_consumption() {
        let (notifier, mut receiver) = channel();

        assert!(notifier.notify(Signal::Interrupt));
        assert_eq!(receiver.recv().await, Some(Signal::Interrupt));
        assert!(notifier.notify(Signal::Terminate));
    }

    #[tokio::test]
    async fn test_closed_when_notifiers_dropped() {
        let (notifier, mut receiver) = channel();
        drop(notifier);
        assert_eq!(receiver.recv().await, None);
    }

    #[tokio::test]
    async fn test_notify_after_receiver_dropped() {
        let (notifier, receiver) = channel();
        drop(receiver);
        assert!(!notifier.notify(Signal::Terminate));
    }

    #[test]
    fn test_signal_display() {
        assert_eq!(Signal::Interrupt.to_string(), "SIGINT");
        assert_eq!(Signal::Terminate.to_string(), "SIGTERM");
    }
}
