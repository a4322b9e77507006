//! HTTP server setup and handlers.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a bound listener until shutdown is requested
//!
//! # Routes
//! - `GET /student/{id}`: student lookup
//! - `GET /health`: liveness
//! - `GET /info`: service and node status

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::http::request::UuidRequestId;
use crate::lifecycle::ShutdownListener;
use crate::node::{NodeInfo, NodeState};
use crate::observability::metrics;
use crate::students::{StudentService, StudentView};

/// Static facts about the running service, reported by `/info`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub ar_node: String,
    pub database: Option<String>,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub node: Arc<NodeState>,
    pub info: Arc<ServiceInfo>,
}

/// HTTP API of the demo service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState, request_timeout: Duration) -> Self {
        Self {
            router: Self::build_router(state, request_timeout),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        Router::new()
            .route("/student/{id}", get(get_student))
            .route("/health", get(health))
            .route("/info", get(info))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Serve on the given listener until shutdown is requested, then drain.
    pub async fn run(self, listener: TcpListener, mut shutdown: ShutdownListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

async fn get_student(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let id = match raw_id.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            metrics::record_request("student", 400);
            return error_response(StatusCode::BAD_REQUEST, format!("invalid student id '{}'", raw_id));
        }
    };

    match state.students.get_student(id) {
        Some(student) => {
            metrics::record_request("student", 200);
            Json(StudentView::from(student)).into_response()
        }
        None => {
            metrics::record_request("student", 404);
            error_response(StatusCode::NOT_FOUND, format!("student {} not found", id))
        }
    }
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<HealthBody> {
    metrics::record_request("health", 200);
    Json(HealthBody { status: "ok" })
}

#[derive(Serialize)]
struct InfoBody {
    #[serde(flatten)]
    service: ServiceInfo,
    node: Option<NodeInfo>,
    probe_failures: u32,
}

async fn info(State(state): State<AppState>) -> Json<InfoBody> {
    metrics::record_request("info", 200);
    Json(InfoBody {
        service: state.info.as_ref().clone(),
        node: state.node.latest().map(|info| info.as_ref().clone()),
        probe_failures: state.node.consecutive_failures(),
    })
}
