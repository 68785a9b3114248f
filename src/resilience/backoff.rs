//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

use crate::config::BackoffConfig;

/// Stateful exponential backoff.
///
/// The n-th call returns `min * factor^n` capped at `max`. With jitter enabled
/// the value is drawn uniformly between that step and the next one (still
/// capped), so consecutive delays never decrease.
#[derive(Debug, Clone)]
pub struct Backoff {
    min: Duration,
    max: Duration,
    factor: f64,
    jitter: bool,
    attempt: u32,
}

impl Backoff {
    pub fn new(config: &BackoffConfig) -> Self {
        Self {
            min: config.min,
            max: config.max.max(config.min),
            factor: config.factor.max(1.0),
            jitter: config.jitter,
            attempt: 0,
        }
    }

    /// Number of delays handed out so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Next delay; advances the attempt counter.
    pub fn next_delay(&mut self) -> Duration {
        let current = self.step(self.attempt);
        self.attempt = self.attempt.saturating_add(1);

        if !self.jitter {
            return current;
        }

        let next = self.step(self.attempt);
        if next <= current {
            return current;
        }

        let spread = (next - current).as_secs_f64();
        let extra = rand::thread_rng().gen_range(0.0..spread);
        (current + Duration::from_secs_f64(extra)).min(self.max)
    }

    fn step(&self, attempt: u32) -> Duration {
        let max_secs = self.max.as_secs_f64();
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.min.as_secs_f64() * self.factor.powi(exponent);
        if !secs.is_finite() || secs >= max_secs {
            self.max
        } else {
            Duration::from_secs_f64(secs)
        }
    }
}
