//! API Module
//!
//! Cache-backed HTTP client for the PokeAPI.
//!
//! # Endpoints
//! - `GET /location-area` - Paginated list of location areas
//! - `GET /location-area/{name}` - Pokemon encounters in an area
//! - `GET /pokemon/{name}` - Pokemon details

pub mod client;

pub use client::PokeApiClient;
