use async_trait::async_trait;
use bunkatsu_core::RateTable;

use crate::error::FeedResult;

/// Port for the external rate feed
///
/// Implementations fetch a complete [`RateTable`] snapshot. Timeouts and
/// fallback are applied by the caller, so a source only reports what it
/// actually got.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch a fresh snapshot
    async fn fetch(&self) -> FeedResult<RateTable>;

    /// Source name for logs and errors
    fn name(&self) -> &str;
}
