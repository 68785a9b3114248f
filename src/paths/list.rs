//! Shared, immutable path lists and per-poller cursors.

use std::sync::Arc;

/// Ordered, non-empty list of endpoint paths for one dataset.
///
/// Cloning is cheap; every poller of a run holds the same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathList {
    paths: Arc<[String]>,
}

impl PathList {
    /// Returns `None` when `paths` is empty.
    pub fn new(paths: Vec<String>) -> Option<Self> {
        if paths.is_empty() {
            None
        } else {
            Some(Self { paths: paths.into() })
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    /// A fresh cursor positioned at the first path.
    pub fn cursor(&self) -> PathCursor {
        PathCursor {
            paths: self.clone(),
            index: 0,
        }
    }
}

/// Cycles through a [`PathList`] in order, wrapping after the last path.
#[derive(Debug, Clone)]
pub struct PathCursor {
    paths: PathList,
    index: usize,
}

impl PathCursor {
    /// The path to request now.
    pub fn current(&self) -> &str {
        &self.paths.paths[self.index]
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.paths.len();
    }
}
