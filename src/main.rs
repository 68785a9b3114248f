//! Smoke-test runner service.
//!
//! # Architecture Overview
//!
//! ```text
//!   GET|POST /smoke-test ──▶ http ──▶ run::orchestrator ──▶ paths (dataset CSV)
//!                                          │
//!                                          ├─▶ run::registry (one run per target)
//!                                          │
//!                                          └─▶ N × run::poller ──▶ target service
//!                                                   │
//!                                                   ├─▶ resilience::backoff
//!                                                   └─▶ notify (chat channel)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use smoke_runner::lifecycle::{wait_for_signal, Shutdown};
use smoke_runner::observability::init_logging;
use smoke_runner::HttpServer;

#[derive(Parser)]
#[command(name = "smoke-runner")]
#[command(about = "Runs bounded smoke tests against a target service", long_about = None)]
struct Args {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = smoke_runner::config::load(args.config.as_deref())?;

    init_logging(&config.logging);

    tracing::info!("smoke-runner v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        repo_root = %config.paths.repo_root,
        channel = %config.notifications.channel,
        backoff_min = ?config.poller.backoff.min,
        backoff_max = ?config.poller.backoff.max,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, &shutdown)?;
    let server_task = tokio::spawn(server.run(listener, shutdown.clone()));

    wait_for_signal().await;
    shutdown.trigger();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
