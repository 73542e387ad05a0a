//! Request de-duplication cache.
//!
//! Identical logical requests (same method + URL, query string included)
//! issued while one is already in flight all share the first request's
//! outcome. Settled entries linger for a short debounce window and are then
//! dropped, so the cache never serves stale data beyond that window.

use std::{
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};

use rustc_hash::FxHashMap;
use serde_json::Value;
use tokio::sync::OnceCell;

use super::ApiError;

/// How long a settled entry stays in the cache.
pub const DEBOUNCE: Duration = Duration::from_millis(50);

type Entry = Arc<OnceCell<Result<Value, ApiError>>>;

/// In-memory single-flight cache keyed by request URL.
#[derive(Debug, Default)]
pub struct RequestCache {
    entries: Arc<Mutex<FxHashMap<String, Entry>>>,
}

impl RequestCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fetch` for `key`, or join a request already in flight.
    ///
    /// At most one `fetch` future runs per key at any instant; every caller
    /// that arrives before the entry is evicted observes the same `Ok` or
    /// `Err` outcome. Failures are shared, never retried here.
    pub async fn get_or_fetch<F>(&self, key: &str, fetch: F) -> Result<Value, ApiError>
    where
        F: Future<Output = Result<Value, ApiError>>,
    {
        let entry = self.entry(key);

        let mut fetched = false;
        let result = entry
            .get_or_init(|| {
                fetched = true;
                fetch
            })
            .await
            .clone();

        // The caller that actually ran the fetch schedules the eviction.
        if fetched {
            self.schedule_eviction(key.to_owned(), Arc::clone(&entry));
        }

        result
    }

    /// Number of live entries, settled or in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Whether the cache currently holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, key: &str) -> Entry {
        let Ok(mut entries) = self.entries.lock() else {
            // A poisoned lock means a panic elsewhere; fall back to an
            // unshared entry rather than propagating the poison.
            return Entry::default();
        };

        Arc::clone(entries.entry(key.to_owned()).or_default())
    }

    fn schedule_eviction(&self, key: String, entry: Entry) {
        let map = Arc::clone(&self.entries);

        tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE).await;

            if let Ok(mut entries) = map.lock() {
                // Only evict our own entry; a newer in-flight request for the
                // same key must not be removed from under its callers.
                if entries
                    .get(&key)
                    .is_some_and(|current| Arc::ptr_eq(current, &entry))
                {
                    entries.remove(&key);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn concurrent_calls_share_one_fetch() -> TestResult {
        let cache = Arc::new(RequestCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let slow_fetch = |calls: Arc<AtomicUsize>| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok(json!({"count": 1}))
        };

        let a = {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            tokio::spawn(async move { cache.get_or_fetch("stores", slow_fetch(calls)).await })
        };
        let b = {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            tokio::spawn(async move { cache.get_or_fetch("stores", slow_fetch(calls)).await })
        };

        let (a, b) = (a.await??, b.await??);

        assert_eq!(calls.load(Ordering::SeqCst), 1, "only one fetch should run");
        assert_eq!(a, b);

        Ok(())
    }

    #[tokio::test]
    async fn failures_are_shared_with_waiting_callers() -> TestResult {
        let cache = Arc::new(RequestCache::new());

        let first = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .get_or_fetch("broken", async {
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Err(ApiError::Status { status: 500 })
                    })
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(5)).await;

        let second = cache
            .get_or_fetch("broken", async { Ok(json!({"never": "runs"})) })
            .await;

        assert!(matches!(first.await?, Err(ApiError::Status { status: 500 })));
        assert!(
            matches!(second, Err(ApiError::Status { status: 500 })),
            "waiting caller should observe the shared rejection"
        );

        Ok(())
    }

    #[tokio::test]
    async fn distinct_keys_fetch_independently() -> TestResult {
        let cache = RequestCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for key in ["stores", "categories"] {
            let calls = Arc::clone(&calls);
            let value = cache
                .get_or_fetch(key, async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!(key))
                })
                .await?;
            assert_eq!(value, json!(key));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2, "each key fetches once");

        Ok(())
    }

    #[tokio::test]
    async fn entries_are_evicted_after_the_debounce_window() -> TestResult {
        let cache = RequestCache::new();

        cache.get_or_fetch("banners", async { Ok(json!([])) }).await?;
        assert_eq!(cache.len(), 1);

        tokio::time::sleep(DEBOUNCE + Duration::from_millis(20)).await;

        assert!(cache.is_empty(), "settled entry should be evicted");

        Ok(())
    }
}
