//! Run engine.
//!
//! # Data Flow
//! ```text
//! RunParams (query string)
//!     → request.rs (required parameters, duration, threads)
//!     → PathSource::load (dataset → PathList)
//!     → registry.rs try_start(target)   ── taken → "already running"
//!     → orchestrator.rs spawns the run:
//!           deadline timer + cancellation token
//!           N × poller.rs (cycle paths → outcome.rs → backoff)
//!     → deadline: registry.finish, token cancelled, pollers report
//! ```
//!
//! # Design Decisions
//! - One lock guards the whole registry; entries are toggled, never removed
//! - Pollers are replicas over the same list, not partitions of it
//! - Each poller reports its own summary; counts are never merged
//! - Cancellation is cooperative: in-flight requests and sleeps complete

pub mod orchestrator;
pub mod outcome;
pub mod poller;
pub mod registry;
pub mod request;
pub mod target;

pub use orchestrator::{build_client, RunHandle, RunOrchestrator, RunReport, Submission};
pub use outcome::Outcome;
pub use poller::{Poller, PollerSummary};
pub use registry::RunRegistry;
pub use request::{RunError, RunParams, RunRequest};
pub use target::Target;
