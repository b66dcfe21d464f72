/// Schedule store
///
/// Owns the snapshot behind a reader/writer lock. Periodic refresh
/// fetches outside the lock and takes the write lock only to swap the
/// new snapshot in, so searches keep flowing while a refresh is
/// pending. A failed refresh keeps the previous snapshot: stale data
/// beats no data.

use crate::core::parser::SearchQuery;
use crate::core::search::{search, SearchResult};
use crate::error::Result;
use crate::schedule::cache::FileCache;
use crate::schedule::config::ScheduleConfig;
use crate::schedule::models::{ScheduleIndex, TimeSlot, VersusSchedules};
use crate::schedule::source::{HttpScheduleSource, ScheduleSource};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

const VERSUS_CACHE_NAME: &str = "schedule_cache";
const SALMON_CACHE_NAME: &str = "schedule_cache_salmon";

struct StoreInner {
    index: ScheduleIndex,
    versus_cache: FileCache<VersusSchedules>,
    salmon_cache: FileCache<Vec<TimeSlot>>,
}

/// Owner of the schedule snapshot and its refresh cycle.
pub struct ScheduleStore {
    source: Box<dyn ScheduleSource>,
    ttl: Duration,
    inner: RwLock<StoreInner>,
}

/// Snapshot freshness and size, for diagnostics.
#[derive(Debug, Clone)]
pub struct StoreStatus {
    pub versus_updated: DateTime<Utc>,
    pub salmon_updated: DateTime<Utc>,
    pub regular_slots: usize,
    pub challenge_slots: usize,
    pub open_slots: usize,
    pub x_slots: usize,
    pub salmon_slots: usize,
}

impl ScheduleStore {
    /// Create a store backed by the production HTTP source.
    pub fn new(config: &ScheduleConfig) -> Result<Self> {
        let source = HttpScheduleSource::new(config)?;
        Ok(Self::with_source(Box::new(source), config))
    }

    /// Create a store over any source. Used directly by tests.
    pub fn with_source(source: Box<dyn ScheduleSource>, config: &ScheduleConfig) -> Self {
        let versus_cache: FileCache<VersusSchedules> =
            FileCache::new(&config.cache_dir, VERSUS_CACHE_NAME);
        let salmon_cache: FileCache<Vec<TimeSlot>> =
            FileCache::new(&config.cache_dir, SALMON_CACHE_NAME);

        // A restored cache body doubles as the initial snapshot, even
        // when already past its TTL. The first refresh replaces it.
        let index = ScheduleIndex {
            versus: versus_cache.get().unwrap_or_default(),
            salmon: salmon_cache.get().unwrap_or_default(),
        };

        Self {
            source,
            ttl: config.ttl,
            inner: RwLock::new(StoreInner {
                index,
                versus_cache,
                salmon_cache,
            }),
        }
    }

    /// Refresh the snapshot if the TTL has lapsed. Idempotent within
    /// the TTL window; each family fetches at most once per call.
    ///
    /// The fetches run without holding the lock. Only the TTL check
    /// and the final swap touch it, so concurrent searches are never
    /// blocked on the network.
    pub async fn maybe_refresh(&self) {
        self.refresh_versus().await;
        self.refresh_salmon().await;
    }

    async fn refresh_versus(&self) {
        {
            let inner = self.inner.read().await;
            if !inner.versus_cache.is_expired(self.ttl) {
                debug!("versus schedule cache is valid");
                return;
            }
        }
        info!("versus schedule cache is outdated, fetching");
        match self.source.fetch_versus().await {
            Ok(fresh) => {
                let mut inner = self.inner.write().await;
                if let Err(err) = inner.versus_cache.put(fresh.clone()) {
                    warn!(%err, "could not persist versus schedule cache");
                }
                inner.index.versus = fresh;
            }
            Err(err) => {
                // Keep serving whatever snapshot we already have.
                error!(%err, "versus schedule fetch failed");
            }
        }
    }

    async fn refresh_salmon(&self) {
        {
            let inner = self.inner.read().await;
            if !inner.salmon_cache.is_expired(self.ttl) {
                debug!("salmon schedule cache is valid");
                return;
            }
        }
        info!("salmon schedule cache is outdated, fetching");
        match self.source.fetch_salmon().await {
            Ok(fresh) => {
                let mut inner = self.inner.write().await;
                if let Err(err) = inner.salmon_cache.put(fresh.clone()) {
                    warn!(%err, "could not persist salmon schedule cache");
                }
                inner.index.salmon = fresh;
            }
            Err(err) => {
                error!(%err, "salmon schedule fetch failed");
            }
        }
    }

    /// Resolve a query against the current snapshot.
    pub async fn search(&self, query: &SearchQuery) -> SearchResult {
        let inner = self.inner.read().await;
        search(query, &inner.index, Utc::now())
    }

    pub async fn status(&self) -> StoreStatus {
        let inner = self.inner.read().await;
        StoreStatus {
            versus_updated: inner.versus_cache.last_updated(),
            salmon_updated: inner.salmon_cache.last_updated(),
            regular_slots: inner.index.versus.regular.len(),
            challenge_slots: inner.index.versus.bankara_challenge.len(),
            open_slots: inner.index.versus.bankara_open.len(),
            x_slots: inner.index.versus.x_match.len(),
            salmon_slots: inner.index.salmon.len(),
        }
    }
}
