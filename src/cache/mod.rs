//! Cache Module
//!
//! Provides an in-memory response cache whose entries expire after a fixed
//! interval, enforced by a background reaper task.

mod entry;
mod expiring;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use expiring::Cache;
pub use store::CacheStore;
