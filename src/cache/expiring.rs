//! Expiring Cache Module
//!
//! Thread-safe handle over a [`CacheStore`] with its own reaper task.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper_task;

#[derive(Debug)]
struct Reaper {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

// == Cache ==
/// A key/value cache whose entries are evicted once they outlive `interval`.
///
/// `add` and `get` lock a single mutex for O(1) work and never await, so the
/// handle can be shared freely (typically behind an `Arc`) between tasks and
/// threads. Eviction is periodic: an entry can be read for up to one extra
/// sweep period after it technically expired.
///
/// ```ignore
/// let cache = Cache::new(Duration::from_secs(300))?;
/// cache.add("https://pokeapi.co/api/v2/location-area", body);
/// if let Some(bytes) = cache.get("https://pokeapi.co/api/v2/location-area") {
///     // ...
/// }
/// cache.close().await;
/// ```
#[derive(Debug)]
pub struct Cache {
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    reaper: Mutex<Option<Reaper>>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// # Errors
    /// - `CacheError::InvalidConfig` if `interval` is zero
    /// - `CacheError::NoRuntime` if called outside a Tokio runtime
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "cache interval must be greater than zero".to_string(),
            ));
        }
        Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let store = Arc::new(Mutex::new(CacheStore::new(interval)));
        let (shutdown, shutdown_rx) = oneshot::channel();
        let handle = spawn_reaper_task(store.clone(), interval, shutdown_rx);

        Ok(Self {
            store,
            interval,
            reaper: Mutex::new(Some(Reaper { shutdown, handle })),
        })
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, resetting its age to zero.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        let value = value.into();
        self.store.lock().set(key, value);
    }

    // == Get ==
    /// Returns the payload stored under `key` if it has not been reaped.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.lock().get(key)
    }

    // == Close ==
    /// Stops the reaper and waits for it to exit.
    ///
    /// Returns `true` if this call stopped the reaper and `false` if it was
    /// already stopped. Entries stay readable afterwards but no longer expire.
    pub async fn close(&self) -> bool {
        let Some(reaper) = self.reaper.lock().take() else {
            return false;
        };

        // The receiver only goes away if the task already ended
        let _ = reaper.shutdown.send(());
        if let Err(e) = reaper.handle.await {
            warn!("Cache reaper ended abnormally: {}", e);
        }
        true
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.reaper.lock().is_none()
    }

    // == Accessors ==
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of entries currently held, expired-but-unswept ones included.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }
}
