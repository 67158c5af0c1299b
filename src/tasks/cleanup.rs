//! Expiry sweep for the in-process product cache.
//!
//! Reads already drop expired entries lazily. The sweep bounds how long an
//! entry nobody asks for again can hold a slot. Redis expires keys on its
//! own and gets no sweep.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Starts sweeping `cache` every `every_secs` seconds (at least one).
///
/// Runs until the returned handle is aborted.
pub fn spawn_cleanup_task(cache: &MemoryCache, every_secs: u64) -> JoinHandle<()> {
    let store = cache.shared();
    let period = Duration::from_secs(every_secs.max(1));

    tokio::spawn(async move {
        info!(period_secs = period.as_secs(), "Product cache sweep started");

        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let (purged, remaining) = {
                let mut guard = store.write().await;
                let purged = guard.cleanup_expired();
                (purged, guard.len())
            };

            if purged == 0 {
                debug!(remaining, "Product cache sweep found nothing expired");
            } else {
                info!(purged, remaining, "Product cache sweep purged expired entries");
            }
        }
    })
}

/// Aborts the sweep as part of a normal shutdown.
pub fn stop_cleanup_task(handle: JoinHandle<()>) {
    handle.abort();
    info!("Product cache sweep stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    use super::*;
    use crate::cache::PRODUCT_CACHE_TTL;

    /// Records the level of every event it sees.
    #[derive(Clone, Default)]
    struct LevelRecorder(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for LevelRecorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    async fn seed(cache: &MemoryCache, id: i64, ttl: Duration) {
        cache
            .shared()
            .write()
            .await
            .set(format!("product:{id}"), b"{}".to_vec(), ttl)
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_purges_only_expired_products() {
        let cache = MemoryCache::new(16);
        seed(&cache, 1, Duration::from_secs(1)).await;
        seed(&cache, 2, PRODUCT_CACHE_TTL).await;

        let sweeper = spawn_cleanup_task(&cache, 1);
        time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(cache.len().await, 1);
        sweeper.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_waits_a_full_period_before_first_pass() {
        let cache = MemoryCache::new(16);
        seed(&cache, 1, Duration::from_secs(2)).await;

        let sweeper = spawn_cleanup_task(&cache, 5);
        time::sleep(Duration::from_secs(3)).await;

        // Expired but not yet swept; `len` counts raw slots.
        assert_eq!(cache.len().await, 1);

        time::sleep(Duration::from_secs(3)).await;
        assert!(cache.is_empty().await);
        sweeper.abort();
    }

    #[tokio::test]
    async fn test_aborted_sweep_finishes() {
        let cache = MemoryCache::new(16);

        let sweeper = spawn_cleanup_task(&cache, 0);
        sweeper.abort();

        let outcome = sweeper.await;
        assert!(outcome.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_stop_logs_at_info() {
        let cache = MemoryCache::new(16);
        let sweeper = spawn_cleanup_task(&cache, 1);

        let recorder = LevelRecorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        tracing::subscriber::with_default(subscriber, || stop_cleanup_task(sweeper));

        assert_eq!(*recorder.0.lock().unwrap(), vec![Level::INFO]);
    }
}
