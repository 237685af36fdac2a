//! Response models for the PokeAPI
//!
//! Only the fields the REPL displays are decoded; serde ignores the rest.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{LocationArea, LocationAreaPage, NamedResource, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
