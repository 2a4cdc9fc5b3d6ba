//! Web layer for the transit departures server.
//!
//! Thin by design: parses query parameters into a [`crate::location::Location`]
//! and [`crate::resolver::Criteria`], invokes the resolver, and shapes the
//! response. All lookup logic lives below this layer.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
