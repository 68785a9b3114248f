//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use smoke_runner::config::RunnerConfig;
use smoke_runner::notify::{Notifications, Notifier, NotifyError, RunEvent};
use smoke_runner::paths::StaticPathSource;
use smoke_runner::run::{build_client, RunOrchestrator, RunParams, RunRegistry};

/// Start a programmable backend on an ephemeral port.
///
/// `f` receives the request path and returns the status and body to send.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(path) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(path).await;
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Backend answering every request with the same status.
pub async fn start_fixed_backend(status: u16) -> SocketAddr {
    start_programmable_backend(move |_| async move { (status, "body".to_string()) }).await
}

/// Backend that records every requested path and answers 200.
pub async fn start_recording_backend() -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let addr = start_programmable_backend(move |path| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(path);
            (200, "ok".to_string())
        }
    })
    .await;
    (addr, seen)
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Read the request head (and any body) and return the request path.
async fn read_request(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body_read = buf.len() - head_end;
    while body_read < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body_read += n;
    }

    let request_line = head.lines().next()?;
    let mut parts = request_line.split_whitespace();
    parts.next()?;
    Some(parts.next()?.to_string())
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// Notifier that keeps every event in memory.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<RunEvent>>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count<P: Fn(&RunEvent) -> bool>(&self, predicate: P) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, event: &RunEvent) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Config with short, jitter-free backoff.
pub fn test_config(backoff_ms: u64) -> RunnerConfig {
    let mut config = RunnerConfig::default();
    config.poller.backoff.min = Duration::from_millis(backoff_ms);
    config.poller.backoff.max = Duration::from_millis(backoff_ms * 4);
    config.poller.backoff.jitter = false;
    config
}

pub fn orchestrator(
    config: &RunnerConfig,
    paths: StaticPathSource,
    notifier: RecordingNotifier,
) -> RunOrchestrator {
    RunOrchestrator::new(
        Arc::new(RunRegistry::new()),
        Arc::new(paths),
        Notifications::new(Arc::new(notifier)),
        build_client(&config.poller).unwrap(),
        config,
    )
}

/// Parameters for a run against `addr`.
pub fn params(addr: SocketAddr, duration: &str, threads: u32, service: &str) -> RunParams {
    RunParams {
        host: Some(addr.ip().to_string()),
        proto: Some("http".to_string()),
        port: Some(addr.port().to_string()),
        duration: Some(duration.to_string()),
        threads: Some(threads.to_string()),
        service: Some(service.to_string()),
    }
}
