//! Configuration schema definitions.
//!
//! Every setting can come from a command-line flag or an environment
//! variable. Clap resolves precedence: flag, then environment, then default.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Public Arweave gateway used when no node is configured.
pub const DEFAULT_AR_NODE: &str = "https://arweave.net";

/// Sample local MySQL data source name.
pub const DEFAULT_MYSQL: &str =
    "root@tcp(127.0.0.1:3306)/demo_dev?charset=utf8mb4&parseTime=True&loc=Local";

/// Default bind address of the HTTP API.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

/// Root configuration for the demo service.
#[derive(Debug, Clone, Parser)]
#[command(name = "demo", version = crate::VERSION)]
#[command(about = "Student lookup service with Arweave node monitoring", long_about = None)]
pub struct DemoConfig {
    /// Arweave node endpoint.
    #[arg(long = "ar_node", env = "AR_NODE", default_value = DEFAULT_AR_NODE)]
    pub ar_node: String,

    /// mysql dsn
    #[arg(long = "mysql", env = "MYSQL", default_value = DEFAULT_MYSQL)]
    pub mysql: String,

    /// Bind address of the HTTP API (e.g., "127.0.0.1:8080").
    #[arg(long, env = "DEMO_LISTEN", default_value = DEFAULT_LISTEN)]
    pub listen: String,

    /// Seconds between node probes.
    #[arg(long = "probe-interval", env = "DEMO_PROBE_INTERVAL", default_value_t = 30)]
    pub probe_interval_secs: u64,

    /// Timeout of a single node probe in seconds.
    #[arg(long = "probe-timeout", env = "DEMO_PROBE_TIMEOUT", default_value_t = 10)]
    pub probe_timeout_secs: u64,

    /// Total time allowed for an HTTP request in seconds.
    #[arg(long = "request-timeout", env = "DEMO_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// JSON file with student records to preload.
    #[arg(long, env = "DEMO_STUDENTS")]
    pub students: Option<PathBuf>,

    /// Address of the Prometheus exporter; disabled when unset.
    #[arg(long = "metrics-addr", env = "DEMO_METRICS_ADDR")]
    pub metrics_addr: Option<String>,

    /// Log output format.
    #[arg(long = "log-format", env = "DEMO_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl DemoConfig {
    /// Configuration with the given node endpoint and DSN and defaults elsewhere.
    pub fn new(ar_node: impl Into<String>, mysql: impl Into<String>) -> Self {
        Self {
            ar_node: ar_node.into(),
            mysql: mysql.into(),
            ..Self::default()
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ar_node: DEFAULT_AR_NODE.to_string(),
            mysql: DEFAULT_MYSQL.to_string(),
            listen: DEFAULT_LISTEN.to_string(),
            probe_interval_secs: 30,
            probe_timeout_secs: 10,
            request_timeout_secs: 30,
            students: None,
            metrics_addr: None,
            log_format: LogFormat::Compact,
        }
    }
}
