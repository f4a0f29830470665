//! In-memory listing cache with TTL expiry and LRU eviction.
//!
//! Entries are tracked per user so that a write can drop every listing of
//! that user without scanning the key space. Entries, the per-user index and
//! the fill generations all live behind one lock.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;
use tokio::time::Instant;

use authtodo_core::cache::{FillFence, ListingCache, ListingKey, Lookup, Result};
use authtodo_core::identity::UserId;
use authtodo_core::todo::TodoPage;

#[derive(Debug, Clone)]
struct CacheEntry {
    page: TodoPage,
    created_at: Instant,
}

impl CacheEntry {
    fn new(page: TodoPage) -> Self {
        Self {
            page,
            created_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() < ttl
    }
}

#[derive(Debug)]
struct CacheTable {
    entries: LruCache<ListingKey, CacheEntry>,
    /// user_id -> keys currently cached for that user.
    tracking: HashMap<UserId, HashSet<ListingKey>>,
    /// user_id -> invalidation count, used to fence fills.
    generations: HashMap<UserId, u64>,
}

impl CacheTable {
    fn generation(&self, user_id: UserId) -> u64 {
        self.generations.get(&user_id).copied().unwrap_or(0)
    }

    fn untrack(&mut self, key: &ListingKey) {
        if let Some(keys) = self.tracking.get_mut(&key.user_id) {
            keys.remove(key);
            if keys.is_empty() {
                self.tracking.remove(&key.user_id);
            }
        }
    }

    fn remove(&mut self, key: &ListingKey) -> bool {
        self.untrack(key);
        self.entries.pop(key).is_some()
    }
}

/// Thread-safe listing cache.
///
/// Expired entries are never served: a read finding one removes it and
/// reports a miss. [`ListingCache::sweep_expired`] removes the rest.
#[derive(Debug, Clone)]
pub struct MemoryListingCache {
    table: Arc<RwLock<CacheTable>>,
    ttl: Duration,
}

impl MemoryListingCache {
    /// Creates a cache holding at most `max_entries` listings for `ttl` each.
    pub fn new(ttl: Duration, max_entries: NonZeroUsize) -> Self {
        Self {
            table: Arc::new(RwLock::new(CacheTable {
                entries: LruCache::new(max_entries),
                tracking: HashMap::new(),
                generations: HashMap::new(),
            })),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries currently held, fresh or not.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.table.read().await.entries.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ListingCache for MemoryListingCache {
    async fn lookup(&self, key: &ListingKey) -> Result<Lookup> {
        let mut table = self.table.write().await;

        let cached = table
            .entries
            .get(key)
            .map(|entry| entry.is_fresh(self.ttl).then(|| entry.page.clone()));

        match cached {
            Some(Some(page)) => Ok(Lookup::Hit(page)),
            Some(None) => {
                table.remove(key);
                Ok(Lookup::Miss(FillFence::new(table.generation(key.user_id))))
            }
            None => Ok(Lookup::Miss(FillFence::new(table.generation(key.user_id)))),
        }
    }

    async fn fill(&self, key: ListingKey, page: TodoPage, fence: FillFence) -> Result<bool> {
        let mut table = self.table.write().await;

        if table.generation(key.user_id) != fence.generation() {
            return Ok(false);
        }

        if let Some((evicted, _)) = table.entries.push(key, CacheEntry::new(page)) {
            if evicted != key {
                table.untrack(&evicted);
            }
        }
        table.tracking.entry(key.user_id).or_default().insert(key);

        Ok(true)
    }

    async fn invalidate_user(&self, user_id: UserId) -> Result<usize> {
        let mut table = self.table.write().await;

        *table.generations.entry(user_id).or_insert(0) += 1;

        let keys = table.tracking.remove(&user_id).unwrap_or_default();
        let mut removed = 0;
        for key in &keys {
            if table.entries.pop(key).is_some() {
                removed += 1;
            }
        }

        Ok(removed)
    }

    async fn sweep_expired(&self) -> Result<usize> {
        let mut table = self.table.write().await;

        let expired: Vec<ListingKey> = table
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(self.ttl))
            .map(|(key, _)| *key)
            .collect();

        for key in &expired {
            table.remove(key);
        }

        Ok(expired.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authtodo_core::todo::{Todo, TodoId};
    use chrono::{TimeZone, Utc};

    const TTL: Duration = Duration::from_secs(30);

    fn cache_with_capacity(max_entries: usize) -> MemoryListingCache {
        MemoryListingCache::new(TTL, NonZeroUsize::new(max_entries).unwrap())
    }

    fn page(text: &str) -> TodoPage {
        let at = Utc.timestamp_opt(0, 0).unwrap();
        let todo = Todo::new(TodoId::new(1), UserId::new(1), text).with_created_at(at);
        TodoPage::new(vec![todo], 1)
    }

    fn key(user: u64, limit: i64, offset: i64) -> ListingKey {
        ListingKey::new(UserId::new(user), limit, offset)
    }

    async fn fence_for(cache: &MemoryListingCache, key: &ListingKey) -> FillFence {
        match cache.lookup(key).await.unwrap() {
            Lookup::Miss(fence) => fence,
            Lookup::Hit(_) => panic!("expected a miss for {key}"),
        }
    }

    #[tokio::test]
    async fn test_miss_then_fill_then_hit() {
        let cache = cache_with_capacity(10);
        let k = key(1, 50, 0);

        let fence = fence_for(&cache, &k).await;
        assert!(cache.fill(k, page("a"), fence).await.unwrap());

        assert_eq!(cache.lookup(&k).await.unwrap(), Lookup::Hit(page("a")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_at_ttl() {
        let cache = cache_with_capacity(10);
        let k = key(1, 50, 0);
        let fence = fence_for(&cache, &k).await;
        cache.fill(k, page("a"), fence).await.unwrap();

        tokio::time::advance(TTL - Duration::from_millis(1)).await;
        assert!(matches!(cache.lookup(&k).await.unwrap(), Lookup::Hit(_)));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(matches!(cache.lookup(&k).await.unwrap(), Lookup::Miss(_)));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalidate_user_removes_only_that_user() {
        let cache = cache_with_capacity(10);
        for k in [key(1, 50, 0), key(1, 10, 10), key(2, 50, 0)] {
            let fence = fence_for(&cache, &k).await;
            cache.fill(k, page("a"), fence).await.unwrap();
        }

        assert_eq!(cache.invalidate_user(UserId::new(1)).await.unwrap(), 2);

        assert_eq!(cache.len().await, 1);
        assert!(matches!(
            cache.lookup(&key(2, 50, 0)).await.unwrap(),
            Lookup::Hit(_)
        ));
    }

    #[tokio::test]
    async fn test_stale_fence_is_rejected() {
        let cache = cache_with_capacity(10);
        let k = key(1, 50, 0);

        let fence = fence_for(&cache, &k).await;
        cache.invalidate_user(UserId::new(1)).await.unwrap();

        assert!(!cache.fill(k, page("old"), fence).await.unwrap());
        assert!(cache.is_empty().await);

        let fresh_fence = fence_for(&cache, &k).await;
        assert!(cache.fill(k, page("new"), fresh_fence).await.unwrap());
    }

    #[tokio::test]
    async fn test_other_users_fences_are_unaffected() {
        let cache = cache_with_capacity(10);
        let k = key(2, 50, 0);

        let fence = fence_for(&cache, &k).await;
        cache.invalidate_user(UserId::new(1)).await.unwrap();

        assert!(cache.fill(k, page("a"), fence).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_only_expired_entries() {
        let cache = cache_with_capacity(10);
        let old = key(1, 50, 0);
        let fence = fence_for(&cache, &old).await;
        cache.fill(old, page("old"), fence).await.unwrap();

        tokio::time::advance(Duration::from_secs(20)).await;
        let young = key(1, 10, 0);
        let fence = fence_for(&cache, &young).await;
        cache.fill(young, page("young"), fence).await.unwrap();

        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(cache.sweep_expired().await.unwrap(), 1);

        assert_eq!(cache.len().await, 1);
        assert!(matches!(cache.lookup(&young).await.unwrap(), Lookup::Hit(_)));
    }

    #[tokio::test]
    async fn test_lru_eviction_untracks_evicted_key() {
        let cache = cache_with_capacity(2);
        for k in [key(1, 1, 0), key(1, 2, 0), key(2, 1, 0)] {
            let fence = fence_for(&cache, &k).await;
            cache.fill(k, page("a"), fence).await.unwrap();
        }

        assert_eq!(cache.len().await, 2);
        // The evicted listing no longer counts toward the user's entries.
        assert_eq!(cache.invalidate_user(UserId::new(1)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_refill_same_key_keeps_tracking() {
        let cache = cache_with_capacity(1);
        let k = key(1, 50, 0);
        for text in ["a", "b"] {
            let fence = FillFence::new(0);
            cache.fill(k, page(text), fence).await.unwrap();
        }

        assert_eq!(cache.lookup(&k).await.unwrap(), Lookup::Hit(page("b")));
        assert_eq!(cache.invalidate_user(UserId::new(1)).await.unwrap(), 1);
    }
}
