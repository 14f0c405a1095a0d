//! Rate sources
//!
//! Implementations of the [`RateSource`] port:
//! - [`StaticRateSource`]: a fixed table, for tests and offline use
//! - [`FileRateSource`]: a JSON snapshot re-read on every fetch

use async_trait::async_trait;
use bunkatsu_core::RateTable;
use bunkatsu_ports::{FeedError, FeedResult, RateSource};
use std::path::PathBuf;

/// Serves the same table on every fetch
pub struct StaticRateSource {
    table: RateTable,
}

impl StaticRateSource {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn fetch(&self) -> FeedResult<RateTable> {
        Ok(self.table.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Reads a JSON [`RateTable`] snapshot from disk on every fetch
pub struct FileRateSource {
    path: PathBuf,
    name: String,
}

impl FileRateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl RateSource for FileRateSource {
    async fn fetch(&self) -> FeedResult<RateTable> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| FeedError::Unavailable {
                    feed: self.name.clone(),
                    reason: e.to_string(),
                })?;

        serde_json::from_str(&content).map_err(|e| FeedError::Malformed(e.to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
