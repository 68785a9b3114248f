//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! GET|POST /smoke-test, /generate-load (query parameters)
//!     → server.rs (request ID, trace, timeout layers)
//!     → handlers.rs (hand RunParams to the orchestrator)
//!     → {"status": "ok"} | {"status": "already running against <target>"}
//!     → problem.rs (400 problem+json for rejected requests)
//!
//! GET /health → {"status": "ok"}
//! ```

pub mod handlers;
pub mod problem;
pub mod server;

pub use problem::Problem;
pub use server::{AppState, HttpServer};
