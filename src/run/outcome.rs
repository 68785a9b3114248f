//! Response classification.

/// What a poller makes of one response status.
///
/// The ranges deliberately leave gaps (299, 3xx, >= 600). Those statuses are
/// `Unclassified`: no counter, no notification, but still a backoff pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Status below 299.
    Success,
    /// Status 400..=499.
    Warning,
    /// Status 500..=599.
    Error,
    /// Everything else.
    Unclassified,
}

impl Outcome {
    pub fn classify(status: u16) -> Self {
        match status {
            0..=298 => Outcome::Success,
            400..=499 => Outcome::Warning,
            500..=599 => Outcome::Error,
            _ => Outcome::Unclassified,
        }
    }

    /// Whether the poller sleeps a backoff interval after this outcome.
    pub fn backs_off(self) -> bool {
        self != Outcome::Success
    }
}
