//! Notification subsystem.
//!
//! # Data Flow
//! ```text
//! orchestrator / poller
//!     → Notifications::emit(RunEvent)
//!     → Notifier::send (slack.rs, or log-only when no token is configured)
//!     → failure? logged and dropped
//! ```
//!
//! # Design Decisions
//! - Delivery failures never reach the caller; run behaviour is independent
//!   of whether notifications succeed
//! - Events render their own text (event.rs) so every sink says the same thing

pub mod event;
pub mod slack;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::NotificationConfig;

pub use event::RunEvent;
pub use slack::SlackNotifier;

/// Errors raised while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("notification endpoint returned status {0}")]
    Status(u16),

    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// A channel run events are delivered to.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, event: &RunEvent) -> Result<(), NotifyError>;
}

/// Writes events to the log only. Used when no chat token is configured.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, event: &RunEvent) -> Result<(), NotifyError> {
        tracing::info!(notification = %event, "Notification (log only)");
        Ok(())
    }
}

/// Cheap-to-clone handle that swallows delivery failures.
#[derive(Clone)]
pub struct Notifications {
    inner: Arc<dyn Notifier>,
}

impl Notifications {
    pub fn new(inner: Arc<dyn Notifier>) -> Self {
        Self { inner }
    }

    /// Pick the notifier matching the configuration.
    pub fn from_config(client: reqwest::Client, config: &NotificationConfig) -> Self {
        if config.token.is_empty() {
            tracing::warn!("No notification token configured, notifications are log only");
            Self::new(Arc::new(LogNotifier))
        } else {
            Self::new(Arc::new(SlackNotifier::new(client, config)))
        }
    }

    /// Deliver an event. Failures are logged and otherwise ignored.
    pub async fn emit(&self, event: RunEvent) {
        if let Err(e) = self.inner.send(&event).await {
            tracing::error!(error = %e, notification = %event, "Failed to deliver notification");
        }
    }
}
