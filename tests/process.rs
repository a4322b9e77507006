//! End-to-end runs of the `demo` binary.

#![cfg(unix)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

fn demo_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_demo"));
    cmd.env_remove("MYSQL")
        .env_remove("DEMO_STUDENTS")
        .env_remove("DEMO_METRICS_ADDR")
        .env_remove("DEMO_LOG_FORMAT")
        .env_remove("NO_COLOR")
        .env("RUST_LOG", "demo=info")
        .env("DEMO_LISTEN", "127.0.0.1:0")
        .env("DEMO_PROBE_TIMEOUT", "1")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Forward stdout lines to a channel from a background thread.
fn stream_stdout(child: &mut Child) -> mpsc::Receiver<String> {
    let stdout = child.stdout.take().expect("piped stdout");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(stdout).lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn wait_for_line(rx: &mpsc::Receiver<String>, needle: &str, seen: &mut Vec<String>) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(remaining) {
            Ok(line) => {
                let found = line.contains(needle);
                seen.push(line);
                if found {
                    return true;
                }
            }
            Err(_) => return false,
        }
    }
    false
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Option<ExitStatus> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait().expect("try_wait") {
            return Some(status);
        }
        thread::sleep(Duration::from_millis(20));
    }
    None
}

fn stop_with_sigterm(child: &mut Child) -> ExitStatus {
    send_signal(child, "TERM");
    let status = wait_with_timeout(child, Duration::from_secs(10));
    if status.is_none() {
        let _ = child.kill();
    }
    status.expect("demo did not exit after SIGTERM")
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("free port")
}

fn send_signal(child: &Child, signal: &str) {
    let status = Command::new("kill")
        .arg(format!("-{}", signal))
        .arg(child.id().to_string())
        .status()
        .expect("run kill");
    assert!(status.success());
}

#[test]
fn test_sigterm_exits_cleanly() {
    let mut child = demo_command()
        .env("AR_NODE", "https://example.test")
        .spawn()
        .expect("spawn demo");
    let lines = stream_stdout(&mut child);
    let mut seen = Vec::new();

    assert!(
        wait_for_line(&lines, "HTTP server starting", &mut seen),
        "service never started: {:?}",
        seen
    );
    assert!(seen.iter().any(|line| line == "demo v1.3.5"), "{:?}", seen);
    // Piped stdout gets plain text.
    assert!(seen.iter().all(|line| !line.contains('\u{1b}')), "{:?}", seen);

    send_signal(&child, "TERM");

    let status = wait_with_timeout(&mut child, Duration::from_secs(10));
    if status.is_none() {
        let _ = child.kill();
    }
    let status = status.expect("demo did not exit after SIGTERM");
    assert_eq!(status.code(), Some(0));
}

#[test]
fn test_double_sigint_single_shutdown() {
    let mut child = demo_command()
        .env("AR_NODE", "http://127.0.0.1:9")
        .spawn()
        .expect("spawn demo");
    let lines = stream_stdout(&mut child);
    let mut seen = Vec::new();

    assert!(wait_for_line(&lines, "HTTP server starting", &mut seen));

    send_signal(&child, "INT");
    send_signal(&child, "INT");

    let status = wait_with_timeout(&mut child, Duration::from_secs(10));
    if status.is_none() {
        let _ = child.kill();
    }
    assert_eq!(status.expect("demo did not exit").code(), Some(0));

    // The reader thread disconnects once the child's stdout hits EOF.
    while let Ok(line) = lines.recv_timeout(Duration::from_secs(2)) {
        seen.push(line);
    }
    let stops = seen.iter().filter(|line| line.contains("Demo service stopping")).count();
    assert_eq!(stops, 1, "{:?}", seen);
}

#[test]
fn test_construction_failure_exits_nonzero() {
    let output = demo_command()
        .args(["--mysql", "root@tcp(127.0.0.1:3306)"])
        .output()
        .expect("run demo");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to construct service"), "{}", stderr);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Demo service started"));
}

#[test]
fn test_version_line_survives_strict_filter() {
    let mut child = demo_command()
        .env("RUST_LOG", "warn")
        .env("AR_NODE", "http://127.0.0.1:9")
        .spawn()
        .expect("spawn demo");
    let lines = stream_stdout(&mut child);
    let mut seen = Vec::new();

    assert!(
        wait_for_line(&lines, "v1.3.5", &mut seen),
        "no version line: {:?}",
        seen
    );
    assert_eq!(seen.last().map(String::as_str), Some("demo v1.3.5"));

    assert_eq!(stop_with_sigterm(&mut child).code(), Some(0));

    while let Ok(line) = lines.recv_timeout(Duration::from_secs(2)) {
        seen.push(line);
    }
    assert!(seen.iter().all(|line| !line.contains("INFO")), "{:?}", seen);
}

#[test]
fn test_json_log_format() {
    let mut child = demo_command()
        .args(["--log-format", "json"])
        .env("AR_NODE", "http://127.0.0.1:9")
        .spawn()
        .expect("spawn demo");
    let lines = stream_stdout(&mut child);
    let mut seen = Vec::new();

    assert!(wait_for_line(&lines, "HTTP server starting", &mut seen), "{:?}", seen);
    assert_eq!(stop_with_sigterm(&mut child).code(), Some(0));

    let events: Vec<serde_json::Value> = seen
        .iter()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).expect("log line is JSON"))
        .collect();

    let starting = events
        .iter()
        .find(|event| event["fields"]["message"] == "Service starting")
        .expect("startup event");
    assert_eq!(starting["level"], "INFO");
    assert_eq!(starting["fields"]["name"], "demo");
    assert_eq!(starting["fields"]["version"], "v1.3.5");

    let server = events
        .iter()
        .find(|event| event["fields"]["message"] == "HTTP server starting")
        .expect("server event");
    assert!(server["fields"]["address"].as_str().unwrap().starts_with("127.0.0.1:"));
}

#[test]
fn test_metrics_exporter_serves_scrapes() {
    let port = free_port();
    let mut child = demo_command()
        .env("AR_NODE", "http://127.0.0.1:9")
        .env("DEMO_METRICS_ADDR", format!("127.0.0.1:{}", port))
        .spawn()
        .expect("spawn demo");
    let lines = stream_stdout(&mut child);
    let mut seen = Vec::new();

    assert!(wait_for_line(&lines, "HTTP server starting", &mut seen), "{:?}", seen);
    assert!(seen.iter().any(|line| line.contains("Metrics exporter listening")));

    let mut response = String::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Ok(mut stream) = TcpStream::connect(("127.0.0.1", port)) {
            stream
                .write_all(b"GET /metrics HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                .expect("write scrape");
            stream.read_to_string(&mut response).expect("read scrape");
            break;
        }
        thread::sleep(Duration::from_millis(50));
    }

    assert_eq!(stop_with_sigterm(&mut child).code(), Some(0));
    assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
}
