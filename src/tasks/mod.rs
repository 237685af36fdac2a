//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Reaper: removes expired cache entries once per cache interval

mod reaper;

pub use reaper::spawn_reaper_task;
