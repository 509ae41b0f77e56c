use kpiboard_core::model::row::RawRow;
use kpiboard_core::source::cache::{CacheStatus, ManualClock};
use kpiboard_core::{CacheSettings, FeedCache, FeedError, FeedResult, FeedSource, StalePolicy};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct CountingSource {
    fetches: AtomicUsize,
    failing: AtomicBool,
    delay: Option<Duration>,
}

impl CountingSource {
    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl FeedSource for CountingSource {
    fn source_id(&self) -> &str {
        "counting"
    }

    fn fetch(&self, handle: &str) -> FeedResult<Vec<RawRow>> {
        let call = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(FeedError::Unavailable {
                handle: handle.to_string(),
                message: "upstream down".to_string(),
            });
        }
        Ok(vec![RawRow::from_pairs([("call", json!(call))])])
    }
}

fn settings(stale_policy: StalePolicy) -> CacheSettings {
    CacheSettings {
        ttl: Duration::from_secs(1_800),
        stale_policy,
    }
}

fn call_number(rows: &[RawRow]) -> u64 {
    rows[0].get("call").and_then(|value| value.as_u64()).unwrap()
}

#[test]
fn fresh_entry_is_served_without_fetching() {
    let source = Arc::new(CountingSource::default());
    let clock = Arc::new(ManualClock::new());
    let cache = FeedCache::with_clock(
        Arc::clone(&source),
        settings(StalePolicy::ServeStale),
        Arc::clone(&clock),
    );

    assert_eq!(cache.get("targets").unwrap().status, CacheStatus::Refreshed);
    clock.advance(Duration::from_secs(1_799));
    let read = cache.get(" targets ").unwrap();
    assert_eq!(read.status, CacheStatus::Hit);
    assert_eq!(call_number(&read.rows), 1);
    assert_eq!(source.fetches(), 1);
}

#[test]
fn expired_entry_is_refreshed() {
    let source = Arc::new(CountingSource::default());
    let clock = Arc::new(ManualClock::new());
    let cache = FeedCache::with_clock(
        Arc::clone(&source),
        settings(StalePolicy::ServeStale),
        Arc::clone(&clock),
    );

    cache.get("results").unwrap();
    clock.advance(Duration::from_secs(1_800));
    let read = cache.get("results").unwrap();
    assert_eq!(read.status, CacheStatus::Refreshed);
    assert_eq!(call_number(&read.rows), 2);
}

#[test]
fn failed_refresh_serves_stale_rows() {
    let source = Arc::new(CountingSource::default());
    let clock = Arc::new(ManualClock::new());
    let cache = FeedCache::with_clock(
        Arc::clone(&source),
        settings(StalePolicy::ServeStale),
        Arc::clone(&clock),
    );

    cache.get("memos").unwrap();
    source.failing.store(true, Ordering::SeqCst);
    clock.advance(Duration::from_secs(3_600));

    let read = cache.get("memos").unwrap();
    assert_eq!(read.status, CacheStatus::Stale);
    assert_eq!(call_number(&read.rows), 1);

    source.failing.store(false, Ordering::SeqCst);
    assert_eq!(cache.get("memos").unwrap().status, CacheStatus::Refreshed);
}

#[test]
fn failed_refresh_propagates_under_fail_policy() {
    let source = Arc::new(CountingSource::default());
    let clock = Arc::new(ManualClock::new());
    let cache = FeedCache::with_clock(
        Arc::clone(&source),
        settings(StalePolicy::Fail),
        Arc::clone(&clock),
    );

    cache.get("memos").unwrap();
    source.failing.store(true, Ordering::SeqCst);
    clock.advance(Duration::from_secs(3_600));

    let err = cache.get("memos").unwrap_err();
    assert!(matches!(err, FeedError::Unavailable { .. }));
}

#[test]
fn first_fetch_failure_is_an_error_under_any_policy() {
    let source = Arc::new(CountingSource::default());
    source.failing.store(true, Ordering::SeqCst);
    let cache = FeedCache::new(Arc::clone(&source), settings(StalePolicy::ServeStale));
    assert!(cache.get("targets").is_err());
}

#[test]
fn invalidate_forces_a_refetch() {
    let source = Arc::new(CountingSource::default());
    let cache = FeedCache::new(Arc::clone(&source), CacheSettings::default());

    cache.get("targets").unwrap();
    cache.get("results").unwrap();
    assert_eq!(cache.len(), 2);

    cache.invalidate("targets");
    assert_eq!(cache.get("targets").unwrap().status, CacheStatus::Refreshed);
    assert_eq!(source.fetches(), 3);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn concurrent_readers_of_one_key_share_a_single_fetch() {
    let source = Arc::new(CountingSource {
        delay: Some(Duration::from_millis(50)),
        ..CountingSource::default()
    });
    let cache = FeedCache::new(Arc::clone(&source), CacheSettings::default());

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let read = cache.get("targets").unwrap();
                assert_eq!(call_number(&read.rows), 1);
            });
        }
    });

    assert_eq!(source.fetches(), 1);
}
