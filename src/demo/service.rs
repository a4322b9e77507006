//! The demo service: student API plus node monitor.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::{validate_config, DemoConfig, Dsn, ValidationError};
use crate::demo::error::DemoError;
use crate::http::{AppState, HttpServer, ServiceInfo};
use crate::lifecycle::{Service, ServiceError, Shutdown};
use crate::node::{NodeClient, NodeMonitor, NodeState};
use crate::students::{MemoryStudentMapper, StudentService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Started,
    Stopped,
}

/// Service handle built from the node endpoint and the database DSN.
///
/// Construction validates everything up front; `start` only binds and
/// spawns, and `stop` waits for every spawned task to finish.
pub struct Demo {
    config: DemoConfig,
    listen: SocketAddr,
    dsn: Option<Dsn>,
    students: StudentService,
    node_client: NodeClient,
    shutdown: Shutdown,
    tasks: Vec<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
    node_state: Option<Arc<NodeState>>,
    state: RunState,
}

impl Demo {
    /// Build with default runtime options.
    pub fn new(ar_node: &str, mysql: &str) -> Result<Self, DemoError> {
        Self::from_config(&DemoConfig::new(ar_node, mysql))
    }

    pub fn from_config(config: &DemoConfig) -> Result<Self, DemoError> {
        validate_config(config).map_err(DemoError::InvalidConfig)?;

        let listen: SocketAddr = config.listen.parse().map_err(|_| {
            DemoError::InvalidConfig(vec![ValidationError::InvalidListenAddress(config.listen.clone())])
        })?;
        let dsn = Dsn::parse(&config.mysql)
            .map_err(|e| DemoError::InvalidConfig(vec![e.into()]))?;

        let mapper = match &config.students {
            Some(path) => MemoryStudentMapper::load_json(path)?,
            None => MemoryStudentMapper::new(),
        };

        let node_client = NodeClient::new(
            &config.ar_node,
            Duration::from_secs(config.probe_timeout_secs),
        )?;

        tracing::info!(
            ar_node = %config.ar_node,
            database = %dsn.as_ref().map(ToString::to_string).unwrap_or_else(|| "<none>".into()),
            students = mapper.len(),
            "Demo service constructed"
        );

        Ok(Self {
            config: config.clone(),
            listen,
            dsn,
            students: StudentService::new(Arc::new(mapper)),
            node_client,
            shutdown: Shutdown::new(),
            tasks: Vec::new(),
            local_addr: None,
            node_state: None,
            state: RunState::Idle,
        })
    }

    /// Address the API is bound to, once started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Parsed DSN, `None` when no datastore was configured.
    pub fn dsn(&self) -> Option<&Dsn> {
        self.dsn.as_ref()
    }

    /// Node state published by the monitor, once started.
    pub fn node_state(&self) -> Option<Arc<NodeState>> {
        self.node_state.clone()
    }

    fn spawn(&mut self) -> Result<(), DemoError> {
        match self.state {
            RunState::Idle => {}
            RunState::Started => return Err(DemoError::AlreadyStarted),
            RunState::Stopped => return Err(DemoError::AlreadyStopped),
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| DemoError::NoRuntime)?;

        // Bind synchronously so address conflicts fail start, not a task.
        let bind_err = |source| DemoError::Bind {
            addr: self.listen,
            source,
        };
        let std_listener = std::net::TcpListener::bind(self.listen).map_err(bind_err)?;
        std_listener.set_nonblocking(true).map_err(bind_err)?;
        let local_addr = std_listener.local_addr().map_err(bind_err)?;
        let listener = tokio::net::TcpListener::from_std(std_listener).map_err(bind_err)?;

        let monitor = NodeMonitor::new(
            self.node_client.clone(),
            Duration::from_secs(self.config.probe_interval_secs),
        );
        let node_state = monitor.state();

        let app_state = AppState {
            students: self.students.clone(),
            node: node_state.clone(),
            info: Arc::new(ServiceInfo {
                name: crate::NAME,
                version: crate::VERSION,
                ar_node: self.config.ar_node.clone(),
                database: self.dsn.as_ref().map(|dsn| dsn.dbname.clone()),
            }),
        };
        let server = HttpServer::new(
            app_state,
            Duration::from_secs(self.config.request_timeout_secs),
        );

        let monitor_shutdown = self.shutdown.subscribe();
        self.tasks.push(runtime.spawn(monitor.run(monitor_shutdown)));

        let server_shutdown = self.shutdown.subscribe();
        self.tasks.push(runtime.spawn(async move {
            if let Err(e) = server.run(listener, server_shutdown).await {
                tracing::error!(error = %e, "HTTP server failed");
            }
        }));

        self.local_addr = Some(local_addr);
        self.node_state = Some(node_state);
        self.state = RunState::Started;
        tracing::info!(address = %local_addr, "Demo service started");
        Ok(())
    }

    async fn shutdown_tasks(&mut self) -> Result<(), DemoError> {
        match self.state {
            RunState::Started => {}
            RunState::Idle => return Err(DemoError::NotStarted),
            RunState::Stopped => return Err(DemoError::AlreadyStopped),
        }
        self.state = RunState::Stopped;

        let notified = self.shutdown.trigger();
        tracing::info!(tasks = notified, "Demo service stopping");

        let mut failure = None;
        for handle in self.tasks.drain(..) {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Background task failed");
                failure.get_or_insert_with(|| e.to_string());
            }
        }

        if let Some(message) = failure {
            return Err(DemoError::TaskFailed(message));
        }

        tracing::info!("Demo service stopped");
        Ok(())
    }
}

impl Service for Demo {
    fn start(&mut self) -> Result<(), ServiceError> {
        self.spawn().map_err(Into::into)
    }

    async fn stop(&mut self) -> Result<(), ServiceError> {
        self.shutdown_tasks().await.map_err(Into::into)
    }
}
