//! Background task that drops expired listings.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use authtodo_core::cache::ListingCache;

/// Spawns a task that sweeps `cache` every `every` until `shutdown` fires.
///
/// The first sweep happens one full interval after spawning.
pub fn spawn_sweeper<C>(
    cache: Arc<C>,
    every: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()>
where
    C: ListingCache + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(interval = ?every, "Cache sweeper started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match cache.sweep_expired().await {
                        Ok(0) => {}
                        Ok(removed) => tracing::debug!(removed, "Swept expired listings"),
                        Err(err) => tracing::warn!(error = %err, "Cache sweep failed"),
                    }
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Cache sweeper shutting down");
                    break;
                }
            }
        }
    })
}
