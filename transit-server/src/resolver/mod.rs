//! Stop and schedule resolution.
//!
//! This module implements the joining algorithm that answers:
//! "what is the next vehicle near this location?"
//!
//! A resolution walks stops-by-location → routes-by-stop →
//! schedule-by-stop, filtering by mode, line and direction, then reduces
//! the surviving routes to the earliest upcoming departure. The chain is
//! strictly sequential: each upstream call can gate the next (the schedule
//! lookup only happens when a direction filter needs it).

mod filters;
mod provider;
mod resolve;

pub use provider::TransitProvider;
pub use resolve::{
    Criteria, DepartureRecord, DirectionDeparture, NextTrain, Resolver, RouteDeparture,
};
