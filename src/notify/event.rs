//! Run lifecycle events and their chat rendering.

use std::fmt;

use crate::run::poller::PollerSummary;
use crate::run::target::Target;

/// Something worth telling the notification channel about.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// A run was accepted and its pollers are being spawned.
    Started { dataset: String, target: Target },
    /// One poller observed cancellation. Emitted once per poller.
    Finished { target: Target, summary: PollerSummary },
    /// A 4xx response.
    Warning { path: String, status: u16 },
    /// A 5xx response.
    Error { path: String, status: u16 },
    /// An inbound request was refused before any run was created.
    Rejected { reason: String },
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::Started { dataset, target } => write!(
                f,
                "Starting smoke-test run against {} service running on {}",
                dataset, target
            ),
            RunEvent::Finished { target, summary } => write!(
                f,
                "Finished smoke-test run against {} service: \n {} successes :white_check_mark: \n {} warnings :warning: \n {} errors :x: ",
                target, summary.successes, summary.warnings, summary.errors
            ),
            RunEvent::Warning { path, status } => write!(f, "{} -- Code: {} \u{26a0}", path, status),
            RunEvent::Error { path, status } => write!(f, "{} -- Code: {} \u{274c}", path, status),
            RunEvent::Rejected { reason } => {
                write!(f, "Error handling smoke test request: {} :x:", reason)
            }
        }
    }
}
