//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the runner.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the smoke-test runner.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RunnerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Where path lists are fetched from.
    pub paths: PathSourceConfig,

    /// Notification channel settings.
    pub notifications: NotificationConfig,

    /// Poller behaviour (backoff, request timeout).
    pub poller: PollerConfig,

    /// Timeout configuration for inbound requests.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8001".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Emit JSON lines instead of human readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Path list source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathSourceConfig {
    /// Base URL that `<dataset>.csv` is appended to.
    pub repo_root: String,

    /// Dataset used when a request does not name one.
    pub default_dataset: String,

    /// Timeout for fetching a path list.
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,
}

impl Default for PathSourceConfig {
    fn default() -> Self {
        Self {
            repo_root: "https://raw.githubusercontent.com/earthrise-media/smoke-test-urls/main/"
                .to_string(),
            default_dataset: "api-v3".to_string(),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Chat notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Bearer token. Empty means notifications are only logged.
    pub token: String,

    /// Destination channel.
    pub channel: String,

    /// Message posting endpoint.
    pub api_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            channel: "trace-notifications".to_string(),
            api_url: "https://slack.com/api/chat.postMessage".to_string(),
        }
    }
}

/// Poller configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Backoff applied after non-success responses.
    pub backoff: BackoffConfig,

    /// Per-request timeout. `None` leaves the transport default in place.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Option<Duration>,

    /// Upper bound for `THREADS`; larger requests are clamped to it.
    pub max_threads: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            backoff: BackoffConfig::default(),
            request_timeout: None,
            max_threads: 64,
        }
    }
}

/// Exponential backoff parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// First delay.
    #[serde(with = "humantime_serde")]
    pub min: Duration,

    /// Upper bound for any delay.
    #[serde(with = "humantime_serde")]
    pub max: Duration,

    /// Multiplier between consecutive delays.
    pub factor: f64,

    /// Randomize each delay between the current and the next step.
    pub jitter: bool,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            min: Duration::from_secs(1),
            max: Duration::from_secs(10),
            factor: 2.0,
            jitter: true,
        }
    }
}

/// Timeout configuration for the inbound HTTP surface.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout in seconds (covers the path list fetch).
    pub request_secs: u64,

    /// How long active runs may take to drain on shutdown, in seconds.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            shutdown_grace_secs: 15,
        }
    }
}
