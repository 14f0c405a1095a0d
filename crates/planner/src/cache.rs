//! Rate snapshot caching
//!
//! ```text
//! RateSource ──fetch (timeout)──► RateFetcher ──► RateSnapshot { Live | Fallback }
//!                                                      │
//!                                      RateCache (ttl, explicit invalidate)
//! ```
//!
//! A failed fetch is served from the configured fallback table, flagged as
//! degraded, and never stored: the next request tries the feed again.

use bunkatsu_core::{RateTable, Timestamp};
use bunkatsu_ports::{Clock, FeedError, FeedResult, RateSource};
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;

use crate::config::PlannerConfig;

/// Where a snapshot came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RateOrigin {
    /// Fetched from the named source
    Live { source: String },
    /// Configured fallback table, served because the fetch failed
    Fallback { reason: String },
}

/// A rate table plus when and how it was obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateSnapshot {
    pub table: RateTable,
    pub fetched_at: Timestamp,
    pub origin: RateOrigin,
}

impl RateSnapshot {
    pub fn live(table: RateTable, source: impl Into<String>, fetched_at: Timestamp) -> Self {
        Self {
            table,
            fetched_at,
            origin: RateOrigin::Live {
                source: source.into(),
            },
        }
    }

    pub fn fallback(table: RateTable, reason: impl Into<String>, fetched_at: Timestamp) -> Self {
        Self {
            table,
            fetched_at,
            origin: RateOrigin::Fallback {
                reason: reason.into(),
            },
        }
    }

    /// True when the table is not live data
    pub fn is_degraded(&self) -> bool {
        matches!(self.origin, RateOrigin::Fallback { .. })
    }

    pub fn age(&self, clock: &dyn Clock) -> chrono::Duration {
        clock.now() - self.fetched_at
    }
}

/// Fetches snapshots from a source with a timeout and optional fallback
#[derive(Clone)]
pub struct RateFetcher {
    source: Arc<dyn RateSource>,
    timeout: std::time::Duration,
    fallback: Option<RateTable>,
}

impl RateFetcher {
    pub fn new(source: Arc<dyn RateSource>, timeout: std::time::Duration) -> Self {
        Self {
            source,
            timeout,
            fallback: None,
        }
    }

    /// Fetcher using the timeout and fallback table from `config`
    pub fn from_config(source: Arc<dyn RateSource>, config: &PlannerConfig) -> Self {
        Self {
            source,
            timeout: config.fetch_timeout(),
            fallback: config.fallback_rates.clone(),
        }
    }

    pub fn with_fallback(mut self, table: RateTable) -> Self {
        self.fallback = Some(table);
        self
    }

    /// Fetch a snapshot, falling back when configured
    pub async fn fetch(&self, clock: &dyn Clock) -> FeedResult<RateSnapshot> {
        let result = match tokio::time::timeout(self.timeout, self.source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(FeedError::Timeout {
                feed: self.source.name().to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        };

        match result {
            Ok(table) => {
                info!("Fetched rates from {}", self.source.name());
                Ok(RateSnapshot::live(table, self.source.name(), clock.now()))
            }
            Err(err) => match &self.fallback {
                Some(table) => {
                    warn!("Rate fetch failed ({}), serving fallback rates", err);
                    Ok(RateSnapshot::fallback(table.clone(), err.to_string(), clock.now()))
                }
                None => Err(err),
            },
        }
    }
}

/// Cached rate snapshot with a time-to-live and explicit invalidation
#[derive(Debug, Clone)]
pub struct RateCache {
    snapshot: Option<RateSnapshot>,
    ttl: chrono::Duration,
}

impl RateCache {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            snapshot: None,
            ttl,
        }
    }

    /// Last stored snapshot, however old
    pub fn snapshot(&self) -> Option<&RateSnapshot> {
        self.snapshot.as_ref()
    }

    /// Stored snapshot if it is younger than the ttl
    pub fn fresh(&self, clock: &dyn Clock) -> Option<&RateSnapshot> {
        self.snapshot.as_ref().filter(|s| s.age(clock) < self.ttl)
    }

    /// Keep a snapshot; degraded ones are not cached
    pub fn store(&mut self, snapshot: RateSnapshot) {
        if snapshot.is_degraded() {
            debug!("Not caching degraded rate snapshot");
            return;
        }
        self.snapshot = Some(snapshot);
    }

    /// Drop the stored snapshot so the next request fetches
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    /// Serve the cached snapshot while fresh, otherwise fetch
    pub async fn get_or_fetch(
        &mut self,
        fetcher: &RateFetcher,
        clock: &dyn Clock,
    ) -> FeedResult<RateSnapshot> {
        if let Some(snapshot) = self.fresh(clock) {
            debug!("Rate cache hit, age {}s", snapshot.age(clock).num_seconds());
            return Ok(snapshot.clone());
        }

        let snapshot = fetcher.fetch(clock).await?;
        self.store(snapshot.clone());
        Ok(snapshot)
    }

    /// Invalidate and fetch again
    pub async fn refetch(
        &mut self,
        fetcher: &RateFetcher,
        clock: &dyn Clock,
    ) -> FeedResult<RateSnapshot> {
        info!("Refetching rates");
        self.invalidate();
        self.get_or_fetch(fetcher, clock).await
    }
}
