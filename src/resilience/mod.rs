//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Poller receives a non-success response:
//!     → backoff.rs (next jittered delay, grows until the cap)
//!     → poller sleeps the full delay before its next request
//! ```
//!
//! # Design Decisions
//! - Backoff state is owned by one poller and never shared
//! - Delays never shrink during a poller's life, even after later successes

pub mod backoff;

pub use backoff::Backoff;
