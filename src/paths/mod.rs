//! Path list subsystem.
//!
//! # Data Flow
//! ```text
//! dataset name (SERVICE parameter)
//!     → PathSource::load (csv_source.rs over HTTP, or an in-memory map)
//!     → PathList (non-empty, shared read-only by every poller of a run)
//!     → PathCursor per poller (cyclic, starts at index 0)
//! ```

pub mod csv_source;
pub mod list;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

pub use csv_source::HttpCsvSource;
pub use list::{PathCursor, PathList};

/// Why a path list could not be produced.
#[derive(Debug, Error)]
pub enum PathSourceError {
    #[error("unable to load URLs from {url}: {reason}")]
    Unavailable { url: String, reason: String },

    #[error("malformed path list: {0}")]
    Malformed(#[from] csv::Error),

    #[error("path list is empty")]
    Empty,

    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),
}

/// Looks up the ordered path list for a dataset.
#[async_trait]
pub trait PathSource: Send + Sync {
    async fn load(&self, dataset: &str) -> Result<PathList, PathSourceError>;
}

/// Path lists held in memory, keyed by dataset.
#[derive(Debug, Clone, Default)]
pub struct StaticPathSource {
    datasets: HashMap<String, PathList>,
}

impl StaticPathSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dataset. Empty lists are ignored.
    pub fn with_dataset<I, S>(mut self, name: &str, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(list) = PathList::new(paths.into_iter().map(Into::into).collect()) {
            self.datasets.insert(name.to_string(), list);
        }
        self
    }
}

#[async_trait]
impl PathSource for StaticPathSource {
    async fn load(&self, dataset: &str) -> Result<PathList, PathSourceError> {
        self.datasets
            .get(dataset)
            .cloned()
            .ok_or_else(|| PathSourceError::UnknownDataset(dataset.to_string()))
    }
}
