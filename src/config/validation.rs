//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (backoff bounds, addresses, URLs)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RunnerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RunnerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("paths.repo_root '{0}' is not an absolute URL")]
    RepoRoot(String),

    #[error("paths.default_dataset must not be empty")]
    DefaultDataset,

    #[error("poller.backoff.min must be greater than zero")]
    BackoffMinZero,

    #[error("poller.backoff.min must not exceed poller.backoff.max")]
    BackoffBounds,

    #[error("poller.backoff.factor must be at least 1.0, got {0}")]
    BackoffFactor(f64),

    #[error("poller.max_threads must be greater than zero")]
    MaxThreadsZero,

    #[error("notifications.channel must not be empty")]
    Channel,

    #[error("environment override {name}='{value}' is invalid")]
    Override { name: &'static str, value: String },
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &RunnerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if url::Url::parse(&config.paths.repo_root).is_err() {
        errors.push(ValidationError::RepoRoot(config.paths.repo_root.clone()));
    }

    if config.paths.default_dataset.trim().is_empty() {
        errors.push(ValidationError::DefaultDataset);
    }

    let backoff = &config.poller.backoff;
    if backoff.min.is_zero() {
        errors.push(ValidationError::BackoffMinZero);
    }
    if backoff.min > backoff.max {
        errors.push(ValidationError::BackoffBounds);
    }
    if !(backoff.factor >= 1.0) {
        errors.push(ValidationError::BackoffFactor(backoff.factor));
    }

    if config.poller.max_threads == 0 {
        errors.push(ValidationError::MaxThreadsZero);
    }

    if config.notifications.channel.trim().is_empty() {
        errors.push(ValidationError::Channel);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&RunnerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RunnerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.paths.repo_root = "relative/path".into();
        config.poller.backoff.min = Duration::from_secs(20);
        config.poller.backoff.factor = 0.5;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::BackoffBounds));
        assert!(errors.contains(&ValidationError::BackoffFactor(0.5)));
    }

    #[test]
    fn test_zero_backoff_rejected() {
        let mut config = RunnerConfig::default();
        config.poller.backoff.min = Duration::ZERO;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::BackoffMinZero]);
    }

    #[test]
    fn test_zero_thread_limit_rejected() {
        let mut config = RunnerConfig::default();
        config.poller.max_threads = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MaxThreadsZero]);
    }
}
