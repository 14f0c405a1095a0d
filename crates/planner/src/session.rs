use bunkatsu_ports::Clock;
use dashmap::DashMap;
use log::{debug, info};
use uuid::Uuid;

use crate::cache::{RateCache, RateFetcher, RateSnapshot};
use crate::error::{PlannerError, PlannerResult};

pub type SessionId = Uuid;

/// One rate cache per user session
///
/// Sessions never share snapshots, so one user's refetch does not change
/// the rates another user is planning against.
pub struct SessionRates {
    caches: DashMap<SessionId, RateCache>,
    ttl: chrono::Duration,
}

impl SessionRates {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            caches: DashMap::new(),
            ttl,
        }
    }

    /// Start a session with an empty cache
    pub fn open(&self) -> SessionId {
        let id = Uuid::new_v4();
        self.caches.insert(id, RateCache::new(self.ttl));
        info!("Opened rate session {}", id);
        id
    }

    /// Snapshot for `session`, fetched when the cached one is missing or stale
    ///
    /// Only sessions started with [`SessionRates::open`] are served. The map
    /// entry is not held across the fetch, and a session removed while its
    /// fetch is in flight gets the snapshot without it being stored.
    pub async fn snapshot(
        &self,
        session: SessionId,
        fetcher: &RateFetcher,
        clock: &dyn Clock,
    ) -> PlannerResult<RateSnapshot> {
        let cached = match self.caches.get(&session) {
            Some(cache) => cache.fresh(clock).cloned(),
            None => return Err(PlannerError::UnknownSession(session)),
        };
        if let Some(snapshot) = cached {
            debug!("Session {} served cached rates", session);
            return Ok(snapshot);
        }

        let snapshot = fetcher.fetch(clock).await?;
        if let Some(mut cache) = self.caches.get_mut(&session) {
            cache.store(snapshot.clone());
        }
        Ok(snapshot)
    }

    /// Drop the session's snapshot and fetch a new one
    pub async fn refetch(
        &self,
        session: SessionId,
        fetcher: &RateFetcher,
        clock: &dyn Clock,
    ) -> PlannerResult<RateSnapshot> {
        self.invalidate(session);
        self.snapshot(session, fetcher, clock).await
    }

    pub fn invalidate(&self, session: SessionId) {
        if let Some(mut cache) = self.caches.get_mut(&session) {
            cache.invalidate();
        }
    }

    /// End a session and forget its cache
    pub fn remove(&self, session: SessionId) -> bool {
        self.caches.remove(&session).is_some()
    }

    pub fn len(&self) -> usize {
        self.caches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }
}
