//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Cancel active runs when the server shuts down

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RunnerConfig;
use crate::http::handlers::{health, start_run};
use crate::lifecycle::Shutdown;
use crate::run::RunOrchestrator;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<RunOrchestrator>,
}

/// HTTP front of the runner.
pub struct HttpServer {
    router: Router,
    shutdown_grace: Duration,
    orchestrator: Arc<RunOrchestrator>,
}

impl HttpServer {
    /// Create a server whose collaborators are built from `config`.
    ///
    /// Runs started through it are cancelled as soon as `shutdown` triggers.
    pub fn new(config: RunnerConfig, shutdown: &Shutdown) -> reqwest::Result<Self> {
        let orchestrator =
            Arc::new(RunOrchestrator::from_config(&config)?.with_shutdown(shutdown));
        Ok(Self::with_orchestrator(config, orchestrator))
    }

    /// Create a server around an existing orchestrator.
    pub fn with_orchestrator(config: RunnerConfig, orchestrator: Arc<RunOrchestrator>) -> Self {
        let state = AppState {
            orchestrator: orchestrator.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            shutdown_grace: Duration::from_secs(config.timeouts.shutdown_grace_secs),
            orchestrator,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &RunnerConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health))
            // Legacy alias, kept for existing callers.
            .route("/generate-load", get(start_run).post(start_run))
            .route("/smoke-test", get(start_run).post(start_run))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` fires, then cancel active runs and let them drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.triggered().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        self.orchestrator.shutdown(self.shutdown_grace).await;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
