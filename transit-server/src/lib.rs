//! Transit departures server.
//!
//! A web service that answers: "what is the next transit vehicle near
//! this location, optionally filtered by line and direction?"

pub mod geocode;
pub mod location;
pub mod mbta;
pub mod resolver;
pub mod store;
pub mod web;
