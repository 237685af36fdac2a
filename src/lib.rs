//! pokecache - a Pokedex REPL over a time-expiring response cache
//!
//! The core is [`Cache`]: a mutex-guarded map whose entries are swept by a
//! background reaper once they outlive a fixed interval. The API client,
//! models and REPL are thin layers that read and fill it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::Cache;
pub use config::Config;
pub use error::{ApiError, CacheError};
pub use repl::Session;
