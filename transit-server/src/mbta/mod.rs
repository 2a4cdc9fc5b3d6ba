//! MBTA-realtime API client.
//!
//! This module provides an HTTP client for the MBTA-realtime JSON API,
//! which serves stop, route, schedule and alert data.
//!
//! Key characteristics:
//! - Authentication is a mandatory `api_key` query parameter
//! - Responses nest `mode → route → direction → trip`; absent branches
//!   arrive as omitted arrays, never null
//! - Schedule lookups carry a point-in-time `datetime` parameter and are
//!   time-sensitive: they bypass the request cache entirely
//! - Everything else is idempotent and cached by canonical request URL

mod client;
mod error;
mod types;

pub use client::{MbtaClient, MbtaConfig};
pub use error::UpstreamError;
pub use types::{
    Direction, Mode, Route, Stop, StopRoutes, StopSchedule, StopsByLocation, Trip, TripDetails,
};
