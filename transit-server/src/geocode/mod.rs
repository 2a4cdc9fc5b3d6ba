//! Geocoding service client.
//!
//! Translates free-text addresses to coordinate pairs via an external
//! Nominatim-style search endpoint. Caching of resolved addresses lives in
//! the upstream client, not here.

mod client;
mod error;

pub use client::{GeocodeClient, GeocodeConfig};
pub use error::GeocodeError;
