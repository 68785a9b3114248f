//! Pollers.
//!
//! # Responsibilities
//! - Request `target + path` for each path in turn, wrapping around
//! - Classify every response and keep per-poller counters
//! - Back off after non-success responses
//! - Report a summary once cancellation is observed
//!
//! Cancellation is only checked at the top of the loop. A request or a
//! backoff sleep that is already in progress always completes first.

use tokio_util::sync::CancellationToken;

use crate::config::BackoffConfig;
use crate::notify::{Notifications, RunEvent};
use crate::paths::{PathCursor, PathList};
use crate::resilience::Backoff;
use crate::run::outcome::Outcome;
use crate::run::target::Target;

/// Counters reported by one poller when it stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollerSummary {
    /// Index of the poller within its run.
    pub poller: usize,
    pub successes: u64,
    pub warnings: u64,
    pub errors: u64,
}

/// One concurrent replica cycling through a run's path list.
pub struct Poller {
    target: Target,
    cursor: PathCursor,
    client: reqwest::Client,
    backoff: Backoff,
    notifications: Notifications,
    summary: PollerSummary,
}

impl Poller {
    pub fn new(
        id: usize,
        target: Target,
        paths: &PathList,
        client: reqwest::Client,
        backoff: &BackoffConfig,
        notifications: Notifications,
    ) -> Self {
        Self {
            target,
            cursor: paths.cursor(),
            client,
            backoff: Backoff::new(backoff),
            notifications,
            summary: PollerSummary {
                poller: id,
                ..PollerSummary::default()
            },
        }
    }

    /// Poll until `cancel` fires, then emit and return the summary.
    pub async fn run(mut self, cancel: CancellationToken) -> PollerSummary {
        loop {
            if cancel.is_cancelled() {
                let summary = self.summary;
                tracing::info!(
                    endpoint = %self.target,
                    poller = summary.poller,
                    "completed with {} successes {} warnings and {} errors",
                    summary.successes,
                    summary.warnings,
                    summary.errors
                );
                self.notifications
                    .emit(RunEvent::Finished {
                        target: self.target.clone(),
                        summary,
                    })
                    .await;
                return summary;
            }

            self.poll_once().await;
            self.cursor.advance();
        }
    }

    async fn poll_once(&mut self) {
        let path = self.cursor.current().to_string();
        let url = self.target.url_for(&path);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                // Transport failures move straight on to the next path.
                tracing::error!(poller = self.summary.poller, url = %url, error = %e, "Request failed");
                return;
            }
        };

        let status = response.status().as_u16();
        let length = response.content_length();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        // Drain so the connection can be reused.
        if let Err(e) = response.bytes().await {
            tracing::debug!(url = %url, error = %e, "Failed to read response body");
        }

        let outcome = Outcome::classify(status);
        match outcome {
            Outcome::Success => {
                self.summary.successes += 1;
                tracing::debug!(
                    poller = self.summary.poller,
                    path = %path,
                    status,
                    length = ?length,
                    content_type = %content_type,
                    "\u{2714}"
                );
            }
            Outcome::Warning => {
                self.summary.warnings += 1;
                self.report(RunEvent::Warning { path, status }).await;
            }
            Outcome::Error => {
                self.summary.errors += 1;
                self.report(RunEvent::Error { path, status }).await;
            }
            Outcome::Unclassified => {
                tracing::warn!(poller = self.summary.poller, "{} -- Code: {}", path, status);
            }
        }

        if outcome.backs_off() {
            let delay = self.backoff.next_delay();
            tracing::debug!(poller = self.summary.poller, delay = ?delay, "Backing off");
            tokio::time::sleep(delay).await;
        }
    }

    async fn report(&self, event: RunEvent) {
        tracing::warn!(poller = self.summary.poller, "{}", event);
        self.notifications.emit(event).await;
    }
}
