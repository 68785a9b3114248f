//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!
//! Consumers:
//!     → stdout (pretty for development, JSON lines for production)
//!     → chat notifications for run lifecycle (see `notify`)
//! ```
//!
//! # Design Decisions
//! - Structured fields (`target`, `run_id`, `poller`) on every run event
//! - Counts are summarized once per poller at run end, never streamed

pub mod logging;

pub use logging::init_logging;
