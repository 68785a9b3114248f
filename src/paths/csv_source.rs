//! Path lists published as CSV files under a common root URL.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::PathSourceConfig;
use crate::paths::{PathList, PathSource, PathSourceError};

/// Fetches `<repo_root><dataset>.csv` and uses its first column.
pub struct HttpCsvSource {
    client: reqwest::Client,
    repo_root: String,
    timeout: Duration,
}

impl HttpCsvSource {
    pub fn new(client: reqwest::Client, config: &PathSourceConfig) -> Self {
        Self {
            client,
            repo_root: config.repo_root.clone(),
            timeout: config.fetch_timeout,
        }
    }

    fn url_for(&self, dataset: &str) -> String {
        format!("{}{}.csv", self.repo_root, dataset)
    }
}

#[async_trait]
impl PathSource for HttpCsvSource {
    async fn load(&self, dataset: &str) -> Result<PathList, PathSourceError> {
        let url = self.url_for(dataset);
        let unavailable = |reason: String| PathSourceError::Unavailable {
            url: url.clone(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(unavailable(format!("status {}", response.status())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let paths = parse_paths(&body)?;
        tracing::debug!(dataset = %dataset, count = paths.len(), "Loaded path list");
        Ok(paths)
    }
}

/// Parse headerless CSV, keeping the first column of every record.
pub fn parse_paths(body: &[u8]) -> Result<PathList, PathSourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body);

    let mut paths = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(path) = record.get(0).map(str::trim).filter(|p| !p.is_empty()) {
            paths.push(path.to_string());
        }
    }

    PathList::new(paths).ok_or(PathSourceError::Empty)
}
