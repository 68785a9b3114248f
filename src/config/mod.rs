//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: PORT, LOG_LEVEL, SLACK_TOKEN, ...)
//!     → validation.rs (semantic checks)
//!     → RunnerConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, ConfigError};
pub use schema::{
    BackoffConfig, ListenerConfig, LoggingConfig, NotificationConfig, PathSourceConfig,
    PollerConfig, RunnerConfig, TimeoutConfig,
};
