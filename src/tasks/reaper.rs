//! Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Start used when `now + interval` is not representable (~30 years out).
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Spawns the reaper for `store`, sweeping once every `interval`.
///
/// The first sweep happens one full interval after this call. Each sweep
/// takes the store lock, drops every entry older than `interval` and releases
/// the lock again before sleeping.
///
/// The task exits when `shutdown` fires or when its sender is dropped, so a
/// cache that goes out of scope does not leak its reaper.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_reaper_task(
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    mut shutdown: oneshot::Receiver<()>,
) -> JoinHandle<()> {
    // Anchor the schedule now rather than on first poll
    let now = Instant::now();
    let start = now.checked_add(interval).unwrap_or(now + FAR_FUTURE);

    tokio::spawn(async move {
        info!("Starting cache reaper with interval of {:?}", interval);

        let mut ticker = time::interval_at(start, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Cache reaper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let (removed, remaining) = {
                        let mut guard = store.lock();
                        let removed = guard.evict_expired(Instant::now());
                        (removed, guard.len())
                    };

                    if removed > 0 {
                        info!("Reaper sweep: removed {} expired entries, {} remain", removed, remaining);
                    } else {
                        debug!("Reaper sweep: no expired entries found");
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    fn shared_store() -> Arc<Mutex<CacheStore>> {
        Arc::new(Mutex::new(CacheStore::new(INTERVAL)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_removes_expired_entries() {
        let store = shared_store();
        store.lock().set("expire_soon".to_string(), b"value".to_vec());

        let (_tx, rx) = oneshot::channel();
        let handle = spawn_reaper_task(store.clone(), INTERVAL, rx);

        // Tick at 100ms sees age == interval; tick at 200ms evicts
        time::sleep(INTERVAL * 2 + Duration::from_millis(1)).await;

        assert_eq!(store.lock().get("expire_soon"), None);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_keeps_entry_at_exact_boundary() {
        let store = shared_store();
        store.lock().set("edge".to_string(), b"value".to_vec());

        let (_tx, rx) = oneshot::channel();
        let handle = spawn_reaper_task(store.clone(), INTERVAL, rx);

        // Past the first tick only
        time::sleep(INTERVAL + Duration::from_millis(1)).await;

        assert_eq!(store.lock().get("edge"), Some(b"value".to_vec()));
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_sweeps_empty_store() {
        let store = shared_store();

        let (_tx, rx) = oneshot::channel();
        let handle = spawn_reaper_task(store.clone(), Duration::from_millis(10), rx);

        time::sleep(Duration::from_millis(55)).await;

        assert!(store.lock().is_empty());
        assert!(!handle.is_finished(), "Empty sweeps must not end the reaper");
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_accepts_unrepresentable_start() {
        let (tx, rx) = oneshot::channel();
        let handle = spawn_reaper_task(shared_store(), Duration::from_secs(u64::MAX), rx);

        // Let the task poll its ticker before stopping it
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        assert!(!handle.is_finished());

        tx.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_stops_on_shutdown_signal() {
        let (tx, rx) = oneshot::channel();
        let handle = spawn_reaper_task(shared_store(), INTERVAL, rx);

        tx.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_stops_when_sender_dropped() {
        let (tx, rx) = oneshot::channel::<()>();
        let handle = spawn_reaper_task(shared_store(), INTERVAL, rx);

        drop(tx);
        handle.await.unwrap();
    }
}
