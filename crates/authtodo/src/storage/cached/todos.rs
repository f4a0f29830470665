//! Read-through listing cache in front of a todo service.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use authtodo_core::cache::{ListingCache, ListingKey, Lookup};
use authtodo_core::identity::UserId;
use authtodo_core::service::{Result, TodoService};
use authtodo_core::todo::{TodoId, TodoPage};

use crate::metrics;

/// Cached todo service decorator.
///
/// - **Reads**: serve a fresh cached page, otherwise call the delegate and
///   store its result
/// - **Writes**: call the delegate, then drop every cached page of the user
///
/// Cache failures are logged and never fail the call. A user whose
/// invalidation failed is served straight from the delegate until a retried
/// invalidation succeeds. Delegate errors are returned unchanged and are
/// never cached.
pub struct CachedTodoService<S, C>
where
    S: TodoService,
    C: ListingCache,
{
    service: Arc<S>,
    cache: Arc<C>,
    /// Users whose cached pages may predate an acknowledged write.
    bypassed: RwLock<HashSet<UserId>>,
}

impl<S, C> CachedTodoService<S, C>
where
    S: TodoService,
    C: ListingCache,
{
    pub fn new(service: Arc<S>, cache: Arc<C>) -> Self {
        Self {
            service,
            cache,
            bypassed: RwLock::new(HashSet::new()),
        }
    }

    /// Drops the user's cached pages. On failure the user bypasses the cache.
    async fn invalidate(&self, user_id: UserId) {
        match self.cache.invalidate_user(user_id).await {
            Ok(removed) => tracing::debug!(%user_id, removed, "Invalidated listing cache"),
            Err(err) => {
                tracing::warn!(%user_id, error = %err, "Failed to invalidate listing cache");
                self.bypassed.write().await.insert(user_id);
            }
        }
    }

    /// Returns true if reads for `user_id` may use the cache, retrying a
    /// pending invalidation first.
    async fn cache_usable(&self, user_id: UserId) -> bool {
        if !self.bypassed.read().await.contains(&user_id) {
            return true;
        }

        match self.cache.invalidate_user(user_id).await {
            Ok(removed) => {
                tracing::debug!(%user_id, removed, "Retried listing cache invalidation");
                self.bypassed.write().await.remove(&user_id);
                true
            }
            Err(err) => {
                tracing::warn!(%user_id, error = %err, "Listing cache still unavailable");
                false
            }
        }
    }
}

#[async_trait]
impl<S, C> TodoService for CachedTodoService<S, C>
where
    S: TodoService + 'static,
    C: ListingCache + 'static,
{
    async fn create_todo(&self, user_id: UserId, text: &str) -> Result<TodoId> {
        let id = self.service.create_todo(user_id, text).await?;
        self.invalidate(user_id).await;
        Ok(id)
    }

    async fn list_todos(&self, user_id: UserId, limit: i64, offset: i64) -> Result<TodoPage> {
        if !self.cache_usable(user_id).await {
            metrics::record_cache_miss();
            return self.service.list_todos(user_id, limit, offset).await;
        }

        let key = ListingKey::new(user_id, limit, offset);

        let fence = match self.cache.lookup(&key).await {
            Ok(Lookup::Hit(page)) => {
                tracing::trace!(%key, count = page.items.len(), "Cache hit for listing");
                metrics::record_cache_hit();
                return Ok(page);
            }
            Ok(Lookup::Miss(fence)) => Some(fence),
            Err(err) => {
                tracing::warn!(%key, error = %err, "Listing cache lookup failed");
                None
            }
        };

        tracing::trace!(%key, "Cache miss for listing");
        metrics::record_cache_miss();
        let page = self.service.list_todos(user_id, limit, offset).await?;

        if let Some(fence) = fence {
            match self.cache.fill(key, page.clone(), fence).await {
                Ok(true) => {}
                Ok(false) => tracing::trace!(%key, "Discarded listing computed before invalidation"),
                Err(err) => tracing::warn!(%key, error = %err, "Failed to cache listing"),
            }
        }

        Ok(page)
    }

    async fn complete_todo(&self, user_id: UserId, todo_id: TodoId) -> Result<()> {
        self.service.complete_todo(user_id, todo_id).await?;
        self.invalidate(user_id).await;
        Ok(())
    }
}
