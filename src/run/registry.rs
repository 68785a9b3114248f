//! Debounce registry: at most one active run per target.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::run::target::Target;

/// Target → running flag, behind one lock.
///
/// Entries are created on first use and never removed, only toggled.
#[derive(Debug, Default)]
pub struct RunRegistry {
    runs: Mutex<HashMap<Target, bool>>,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `target`. Returns `false` when a run is already active for it.
    pub fn try_start(&self, target: &Target) -> bool {
        let mut runs = self.runs.lock().expect("run registry mutex poisoned");
        let running = runs.entry(target.clone()).or_insert(false);
        if *running {
            false
        } else {
            *running = true;
            true
        }
    }

    /// Release `target`. The entry stays, set to not running.
    pub fn finish(&self, target: &Target) {
        let mut runs = self.runs.lock().expect("run registry mutex poisoned");
        runs.insert(target.clone(), false);
    }

    pub fn is_running(&self, target: &Target) -> bool {
        let runs = self.runs.lock().expect("run registry mutex poisoned");
        runs.get(target).copied().unwrap_or(false)
    }

    /// Number of targets ever seen.
    pub fn known_targets(&self) -> usize {
        self.runs.lock().expect("run registry mutex poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn target() -> Target {
        Target::new("http", "example.com", "80")
    }

    #[test]
    fn test_claim_and_release() {
        let registry = RunRegistry::new();
        assert!(!registry.is_running(&target()));
        assert!(registry.try_start(&target()));
        assert!(registry.is_running(&target()));
        assert!(!registry.try_start(&target()));

        registry.finish(&target());
        assert!(!registry.is_running(&target()));
        assert_eq!(registry.known_targets(), 1);

        assert!(registry.try_start(&target()));
    }

    #[test]
    fn test_targets_are_independent() {
        let registry = RunRegistry::new();
        let other = Target::new("https", "example.com", "443");
        assert!(registry.try_start(&target()));
        assert!(registry.try_start(&other));
        assert_eq!(registry.known_targets(), 2);
    }

    #[test]
    fn test_concurrent_claims_admit_exactly_one() {
        let registry = Arc::new(RunRegistry::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || registry.try_start(&target()))
            })
            .collect();

        let granted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|granted| *granted)
            .count();
        assert_eq!(granted, 1);
    }
}
