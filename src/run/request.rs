//! Inbound run parameters and their validation.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::paths::PathSourceError;
use crate::run::target::Target;

/// Raw query parameters of a run request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunParams {
    #[serde(rename = "HOST")]
    pub host: Option<String>,
    #[serde(rename = "PROTO")]
    pub proto: Option<String>,
    #[serde(rename = "PORT")]
    pub port: Option<String>,
    #[serde(rename = "DURATION")]
    pub duration: Option<String>,
    #[serde(rename = "THREADS")]
    pub threads: Option<String>,
    #[serde(rename = "SERVICE")]
    pub service: Option<String>,
}

/// A validated request, ready for a path list lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub target: Target,
    pub dataset: String,
    pub duration: Duration,
    pub threads: usize,
}

/// Reasons a request is refused before a run exists.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("missing parameters: {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),

    #[error("can't parse duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("can't find url file for {dataset}: {source}")]
    InvalidService {
        dataset: String,
        #[source]
        source: PathSourceError,
    },
}

impl RunError {
    /// Short title for problem responses.
    pub fn title(&self) -> &'static str {
        match self {
            RunError::MissingParameters(_) => "Missing Parameters",
            RunError::InvalidDuration { .. } => "Invalid Duration",
            RunError::InvalidService { .. } => "Invalid service",
        }
    }

    /// Text for the chat notification that mirrors the rejection.
    pub fn notification_reason(&self) -> String {
        match self {
            RunError::MissingParameters(_) => "required parameters are missing".to_string(),
            RunError::InvalidDuration { reason, .. } => {
                format!("unable to parse duration value {}", reason)
            }
            RunError::InvalidService { dataset, .. } => {
                format!("can't load URLs for {} service", dataset)
            }
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl RunParams {
    /// Check required parameters and parse the duration.
    ///
    /// `THREADS` falls back to 1 when absent, unparsable or zero.
    pub fn validate(&self, default_dataset: &str) -> Result<RunRequest, RunError> {
        let required = [
            ("HOST", present(&self.host)),
            ("PROTO", present(&self.proto)),
            ("PORT", present(&self.port)),
            ("DURATION", present(&self.duration)),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        let (host, proto, port, duration) = match required {
            [(_, Some(host)), (_, Some(proto)), (_, Some(port)), (_, Some(duration))] => {
                (host, proto, port, duration)
            }
            _ => return Err(RunError::MissingParameters(missing)),
        };

        let duration = humantime::parse_duration(duration).map_err(|e| {
            RunError::InvalidDuration {
                value: duration.to_string(),
                reason: e.to_string(),
            }
        })?;

        let threads = match present(&self.threads) {
            None => 1,
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(threads = %raw, "Invalid THREADS value, using 1");
                    1
                }
            },
        };

        let dataset = present(&self.service)
            .unwrap_or(default_dataset)
            .to_string();

        Ok(RunRequest {
            target: Target::new(proto, host, port),
            dataset,
            duration,
            threads,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> RunParams {
        RunParams {
            host: Some("example.com".into()),
            proto: Some("http".into()),
            port: Some("80".into()),
            duration: Some("30s".into()),
            ..RunParams::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let request = params().validate("api-v3").unwrap();
        assert_eq!(request.target.as_str(), "http://example.com:80");
        assert_eq!(request.dataset, "api-v3");
        assert_eq!(request.duration, Duration::from_secs(30));
        assert_eq!(request.threads, 1);
    }

    #[test]
    fn test_explicit_threads_and_service() {
        let mut p = params();
        p.threads = Some("4".into());
        p.service = Some("tiles".into());
        p.duration = Some("1m 30s".into());
        let request = p.validate("api-v3").unwrap();
        assert_eq!(request.threads, 4);
        assert_eq!(request.dataset, "tiles");
        assert_eq!(request.duration, Duration::from_secs(90));
    }

    #[test]
    fn test_bad_threads_fall_back_to_one() {
        for raw in ["0", "-2", "many"] {
            let mut p = params();
            p.threads = Some(raw.into());
            assert_eq!(p.validate("api-v3").unwrap().threads, 1);
        }
    }

    #[test]
    fn test_missing_parameters_listed() {
        let mut p = params();
        p.host = None;
        p.duration = Some("   ".into());
        match p.validate("api-v3") {
            Err(RunError::MissingParameters(names)) => assert_eq!(names, vec!["HOST", "DURATION"]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_duration() {
        let mut p = params();
        p.duration = Some("notaduration".into());
        let err = p.validate("api-v3").unwrap_err();
        assert!(matches!(err, RunError::InvalidDuration { .. }));
        assert_eq!(err.title(), "Invalid Duration");
        assert!(err.notification_reason().starts_with("unable to parse duration value"));
    }
}
