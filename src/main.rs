//! Pokedex - an interactive PokeAPI browser
//!
//! Responses are cached in memory for `CACHE_INTERVAL_SECS` so paging back
//! and forth does not hit the network twice.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokecache::{repl, Cache, Config, PokeApiClient, Session};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber (stderr, so it never mixes with the prompt)
/// 2. Load configuration from environment variables
/// 3. Create the response cache and its reaper
/// 4. Build the API client and session
/// 5. Run the REPL on stdin/stdout until `exit` or EOF
/// 6. Stop the reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to quiet library logs, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokecache=warn,pokedex=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={}s, base_url={}, http_timeout={}s",
        config.cache_interval, config.base_url, config.http_timeout
    );

    let cache = Arc::new(
        Cache::new(config.cache_interval()).context("failed to create response cache")?,
    );
    let client = PokeApiClient::new(&config.base_url, cache.clone(), config.http_timeout())
        .context("failed to build HTTP client")?;
    let mut session = Session::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let result = repl::run(&mut session, stdin, &mut stdout).await;

    cache.close().await;
    info!("Pokedex closed");
    result
}
