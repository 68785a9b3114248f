//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RunnerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration for the service process.
///
/// Starts from the TOML file when one is given (defaults otherwise), applies
/// environment overrides, then validates the result.
pub fn load(path: Option<&Path>) -> Result<RunnerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml::from_str::<RunnerConfig>(&fs::read_to_string(path)?)?,
        None => RunnerConfig::default(),
    };

    apply_overrides(&mut config, |name| std::env::var(name).ok())
        .map_err(ConfigError::Validation)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `PORT`, `LOG_LEVEL`, `JSON_LOG`, `REPO_ROOT`, `SLACK_TOKEN`,
/// `SLACK_CHANNEL` and `SLACK_API_URL` overrides read through `lookup`.
pub fn apply_overrides<F>(config: &mut RunnerConfig, lookup: F) -> Result<(), Vec<ValidationError>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut errors = Vec::new();

    if let Some(port) = lookup("PORT") {
        let parsed = port.trim().parse::<u16>();
        match parsed {
            Ok(port) => {
                let host = config
                    .listener
                    .bind_address
                    .rsplit_once(':')
                    .map(|(host, _)| host.to_string())
                    .unwrap_or_else(|| "0.0.0.0".to_string());
                config.listener.bind_address = format!("{}:{}", host, port);
            }
            Err(_) => errors.push(ValidationError::Override { name: "PORT", value: port }),
        }
    }

    if let Some(level) = lookup("LOG_LEVEL") {
        config.logging.level = level.to_lowercase();
    }

    if let Some(json) = lookup("JSON_LOG") {
        let normalized = json.trim().to_lowercase();
        match normalized.as_str() {
            "1" | "true" | "yes" => config.logging.json = true,
            "0" | "false" | "no" => config.logging.json = false,
            _ => errors.push(ValidationError::Override { name: "JSON_LOG", value: json }),
        }
    }

    if let Some(root) = lookup("REPO_ROOT") {
        config.paths.repo_root = root;
    }
    if let Some(token) = lookup("SLACK_TOKEN") {
        config.notifications.token = token;
    }
    if let Some(channel) = lookup("SLACK_CHANNEL") {
        config.notifications.channel = channel;
    }
    if let Some(url) = lookup("SLACK_API_URL") {
        config.notifications.api_url = url;
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
