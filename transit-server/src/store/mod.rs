//! Durable key-value cache for upstream responses.
//!
//! Two independently-keyed collections back the upstream client: one for
//! opaque request results keyed by canonical URL (or normalized geocoding
//! address), one for resolved trip records keyed by trip id. Each collection
//! pairs the durable SQLite table with a bounded in-process mirror so that
//! repeat reads within a process lifetime skip the storage round-trip.

mod error;
mod kv;

pub use error::StoreError;
pub use kv::{Collection, Store, StoreConfig};
