//! Shutdown fan-out for the service's internal tasks.

use tokio::sync::broadcast;

/// Coordinator that tells every internal task to stop.
///
/// The shell never sees this; it is owned by the service and triggered from
/// its `stop` operation.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Hand out a listener for one task.
    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Broadcast the stop request. Returns the number of tasks notified.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }

    /// Number of listeners still alive.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side held by a single task.
#[derive(Debug)]
pub struct ShutdownListener {
    rx: broadcast::Receiver<()>,
}

impl ShutdownListener {
    /// Resolve once stop has been requested or the coordinator is gone.
    pub async fn wait(&mut self) {
        // Ok, Lagged and Closed all mean the same thing here.
        let _ = self.rx.recv().await;
    }
}
