use async_trait::async_trait;

use crate::identity::UserId;
use crate::todo::TodoPage;

use super::{FillFence, ListingKey, Lookup, Result};

/// Time-bounded store of listing results.
#[async_trait]
pub trait ListingCache: Send + Sync {
    /// Returns the cached page for `key` if present and fresh.
    ///
    /// On a miss, returns the fence the caller must present to [`fill`].
    ///
    /// [`fill`]: ListingCache::fill
    async fn lookup(&self, key: &ListingKey) -> Result<Lookup>;

    /// Stores a page computed after a miss.
    ///
    /// Returns `false` when the fence is stale and the page was discarded.
    async fn fill(&self, key: ListingKey, page: TodoPage, fence: FillFence) -> Result<bool>;

    /// Drops every entry belonging to `user_id`. Returns how many were removed.
    async fn invalidate_user(&self, user_id: UserId) -> Result<usize>;

    /// Drops every expired entry. Returns how many were removed.
    async fn sweep_expired(&self) -> Result<usize>;
}
