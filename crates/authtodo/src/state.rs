//! Shared application state.
//!
//! Wires the service chains once at startup:
//!
//! - auth: `Instrumented -> Logging -> InMemoryIdentityStore`
//! - todos: `Instrumented -> Logging -> Cached -> InMemoryTodoStore`

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use authtodo_core::service::{AuthService, TodoService};

use crate::cache::{spawn_sweeper, MemoryListingCache};
use crate::config::Config;
use crate::middleware::{
    InstrumentedAuthService, InstrumentedTodoService, LoggingAuthService, LoggingTodoService,
    RateLimit,
};
use crate::storage::{CachedTodoService, InMemoryIdentityStore, InMemoryTodoStore};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Outermost link of the auth chain.
    pub auth: Arc<dyn AuthService>,
    /// Outermost link of the todo chain.
    pub todos: Arc<dyn TodoService>,
    /// The listing cache behind `todos`, kept for the sweeper.
    pub listing_cache: Arc<MemoryListingCache>,
    pub rate_limit: RateLimit,
    pub request_timeout: Duration,
    /// Shutdown signal for background tasks.
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Creates the in-memory stores, the listing cache and both decorator chains.
    pub fn new(config: &Config) -> Self {
        let max_entries =
            NonZeroUsize::new(config.cache_max_entries).unwrap_or(NonZeroUsize::MIN);
        let listing_cache = Arc::new(MemoryListingCache::new(config.cache_ttl(), max_entries));

        let identity_store: Arc<dyn AuthService> = Arc::new(InMemoryIdentityStore::new());
        let auth: Arc<dyn AuthService> = Arc::new(InstrumentedAuthService::new(Arc::new(
            LoggingAuthService::new(identity_store),
        )));

        let cached: Arc<dyn TodoService> = Arc::new(CachedTodoService::new(
            Arc::new(InMemoryTodoStore::new()),
            listing_cache.clone(),
        ));
        let todos: Arc<dyn TodoService> = Arc::new(InstrumentedTodoService::new(Arc::new(
            LoggingTodoService::new(cached),
        )));

        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            auth,
            todos,
            listing_cache,
            rate_limit: RateLimit::new(config.rate_limit_per_second, config.rate_limit_burst),
            request_timeout: config.request_timeout(),
            shutdown_tx,
        }
    }

    /// Starts the cache sweeper. It runs every TTL until [`signal_shutdown`].
    ///
    /// [`signal_shutdown`]: AppState::signal_shutdown
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        spawn_sweeper(
            self.listing_cache.clone(),
            self.listing_cache.ttl(),
            self.subscribe_shutdown(),
        )
    }

    /// Subscribe to shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal all background tasks to shut down.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}
