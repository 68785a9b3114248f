//! Smoke-test runner library.
//!
//! Triggers bounded-duration synthetic load against a target service: a
//! request names a target and a dataset of endpoint paths, and the runner
//! polls those paths with N concurrent pollers until a deadline, reporting
//! warnings, errors and per-poller summaries to a chat channel.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod notify;
pub mod observability;
pub mod paths;
pub mod resilience;
pub mod run;

pub use config::RunnerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use run::RunOrchestrator;
