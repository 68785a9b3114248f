//! Shutdown coordination.

use tokio_util::sync::CancellationToken;

/// Root of the process cancellation tree.
///
/// The HTTP server waits on it to stop accepting connections, and the run
/// orchestrator derives its own root token from it, so a single trigger
/// reaches every active poller.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token cancelled together with this shutdown (and never before it).
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Start shutting down. Idempotent.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once `trigger` has been called, immediately if it already was.
    pub async fn triggered(&self) {
        self.token.cancelled().await
    }
}
