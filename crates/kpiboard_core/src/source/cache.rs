//! Read-through feed cache.
//!
//! # Responsibility
//! - Serve feed rows within a freshness window without refetching.
//! - Refresh expired entries with one fetch per key at a time.
//! - Apply an explicit refresh-or-serve-stale policy on fetch failure.
//!
//! # Invariants
//! - Concurrent callers of the same key never fetch in parallel; later
//!   callers wait on the key lock and reuse the refreshed entry.
//! - Different keys never block each other beyond the short map lock.
//! - Cached rows are shared read-only (`Arc`).

use crate::model::row::RawRow;
use crate::source::{FeedResult, FeedSource};
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default freshness window.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Monotonic time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for hosts that drive time themselves.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock()
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// What to do when refreshing an expired entry fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Keep serving the expired rows and retry on the next read.
    #[default]
    ServeStale,
    /// Propagate the fetch error.
    Fail,
}

/// How a read was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Refreshed,
    Stale,
}

#[derive(Debug, Clone)]
pub struct CacheRead {
    pub rows: Arc<Vec<RawRow>>,
    pub status: CacheStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub ttl: Duration,
    pub stale_policy: StalePolicy,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            stale_policy: StalePolicy::default(),
        }
    }
}

struct CachedFeed {
    rows: Arc<Vec<RawRow>>,
    fetched_at: Instant,
}

type Slot = Arc<Mutex<Option<CachedFeed>>>;

/// Time-bounded cache in front of a `FeedSource`, keyed by feed handle.
pub struct FeedCache<S, C = SystemClock> {
    source: S,
    clock: C,
    settings: CacheSettings,
    slots: Mutex<HashMap<String, Slot>>,
}

impl<S: FeedSource> FeedCache<S, SystemClock> {
    pub fn new(source: S, settings: CacheSettings) -> Self {
        Self::with_clock(source, settings, SystemClock)
    }
}

impl<S: FeedSource, C: Clock> FeedCache<S, C> {
    pub fn with_clock(source: S, settings: CacheSettings, clock: C) -> Self {
        Self {
            source,
            clock,
            settings,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> CacheSettings {
        self.settings
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns rows for `handle`, fetching when missing or expired.
    pub fn get(&self, handle: &str) -> FeedResult<CacheRead> {
        let key = handle.trim();
        let slot = self.slot(key);
        let mut entry = slot.lock();

        if let Some(cached) = entry.as_ref() {
            let age = self.clock.now().saturating_duration_since(cached.fetched_at);
            if age < self.settings.ttl {
                debug!(
                    "event=feed_cache_hit module=source source={} age_ms={}",
                    self.source.source_id(),
                    age.as_millis()
                );
                return Ok(CacheRead {
                    rows: Arc::clone(&cached.rows),
                    status: CacheStatus::Hit,
                });
            }
        }

        match self.source.fetch(key) {
            Ok(rows) => {
                let rows = Arc::new(rows);
                info!(
                    "event=feed_fetched module=source source={} rows={}",
                    self.source.source_id(),
                    rows.len()
                );
                *entry = Some(CachedFeed {
                    rows: Arc::clone(&rows),
                    fetched_at: self.clock.now(),
                });
                Ok(CacheRead {
                    rows,
                    status: CacheStatus::Refreshed,
                })
            }
            Err(err) => match (entry.as_ref(), self.settings.stale_policy) {
                (Some(stale), StalePolicy::ServeStale) => {
                    warn!(
                        "event=feed_refresh_failed module=source source={} status=serving_stale error={}",
                        self.source.source_id(),
                        err
                    );
                    Ok(CacheRead {
                        rows: Arc::clone(&stale.rows),
                        status: CacheStatus::Stale,
                    })
                }
                _ => {
                    warn!(
                        "event=feed_refresh_failed module=source source={} status=error error={}",
                        self.source.source_id(),
                        err
                    );
                    Err(err)
                }
            },
        }
    }

    /// Drops the entry for `handle`; the next read fetches.
    pub fn invalidate(&self, handle: &str) {
        self.slots.lock().remove(handle.trim());
    }

    pub fn clear(&self) {
        self.slots.lock().clear();
    }

    /// Number of keys with a slot (filled or being filled).
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &str) -> Slot {
        let mut slots = self.slots.lock();
        Arc::clone(slots.entry(key.to_string()).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, SystemClock};
    use std::time::Duration;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);
        clock.advance(Duration::from_secs(5));
        assert_eq!(clock.now() - start, Duration::from_secs(5));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
