//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

use demo::lifecycle::{Service, ServiceError};

/// Start a mock Arweave node whose `/info` returns the given status and body.
/// Returns the address it listens on; every request is counted in `hits`.
pub async fn start_mock_node(status: u16, body: &'static str, hits: Arc<AtomicUsize>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let status = StatusCode::from_u16(status).unwrap();
    let app = Router::new().route(
        "/info",
        get(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (status, [("content-type", "application/json")], body)
            }
        }),
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}

pub const NODE_INFO: &str = r#"{"network":"arweave.N.1","version":5,"release":69,"height":1234567,"current":"abc","blocks":1234568,"peers":77,"queue_length":0,"node_state_latency":1}"#;

/// Write a JSON student seed file.
pub fn student_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Poll `check` until it holds or `timeout` elapses.
pub async fn eventually<F: Fn() -> bool>(timeout: Duration, check: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

/// Test double recording every lifecycle call in order.
#[derive(Clone, Default)]
pub struct RecordingService {
    pub events: Arc<Mutex<Vec<&'static str>>>,
    pub starts: Arc<AtomicUsize>,
    pub stops: Arc<AtomicUsize>,
    pub fail_start: bool,
    pub fail_stop: bool,
}

impl RecordingService {
    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl Service for RecordingService {
    fn start(&mut self) -> Result<(), ServiceError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push("start");
        if self.fail_start {
            return Err(ServiceError::new("start refused"));
        }
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), ServiceError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push("stop");
        if self.fail_stop {
            return Err(ServiceError::new("stop refused"));
        }
        Ok(())
    }
}
