//! PokeAPI client
//!
//! Every GET goes through the response cache first; raw bodies are cached
//! under their full URL before decoding.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::Cache;
use crate::error::ApiError;
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// Client for the PokeAPI REST endpoints.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
    cache: Arc<Cache>,
}

impl PokeApiClient {
    /// Creates a client with its own `reqwest` connection pool.
    pub fn new(
        base_url: impl Into<String>,
        cache: Arc<Cache>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url, cache))
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: impl Into<String>, cache: Arc<Cache>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<Cache> {
        &self.cache
    }

    // == Endpoint URLs ==
    /// URL of the first page of location areas.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    pub fn location_area_url(&self, name: &str) -> Result<String, ApiError> {
        Ok(format!("{}/location-area/{}", self.base_url, path_segment(name)?))
    }

    pub fn pokemon_url(&self, name: &str) -> Result<String, ApiError> {
        Ok(format!("{}/pokemon/{}", self.base_url, path_segment(name)?))
    }

    // == Fetch ==
    /// Returns the body at `url`, from the cache when possible.
    ///
    /// Only successful responses are cached.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        if let Some(body) = self.cache.get(url) {
            debug!("Cache hit for {}", url);
            return Ok(body);
        }
        debug!("Cache miss for {}, fetching", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?.to_vec();
        self.cache.add(url, body.clone());
        Ok(body)
    }

    /// Fetches `url` and decodes the JSON body.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self.fetch_bytes(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // == Typed Endpoints ==
    /// Fetches a page of location areas; `None` means the first page.
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage, ApiError> {
        let url = match page_url {
            Some(url) => url.to_string(),
            None => self.location_areas_url(),
        };
        self.fetch_json(&url).await
    }

    pub async fn location_area(&self, name: &str) -> Result<LocationArea, ApiError> {
        self.fetch_json(&self.location_area_url(name)?).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<Pokemon, ApiError> {
        self.fetch_json(&self.pokemon_url(name)?).await
    }
}

/// Checks that `name` is a single resource slug (`[A-Za-z0-9-]+`).
///
/// Anything else could rewrite the request path, e.g. `../pokemon/pikachu`.
fn path_segment(name: &str) -> Result<&str, ApiError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(name)
    } else {
        Err(ApiError::InvalidName(name.to_string()))
    }
}
