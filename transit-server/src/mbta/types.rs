//! MBTA-realtime API response DTOs.
//!
//! These types map directly to the MBTA-realtime JSON responses. The API
//! omits empty branches of the `mode → route → direction → trip` tree
//! rather than sending nulls, so every nested sequence uses
//! `#[serde(default)]`: a route with no directions or a direction with no
//! trips is an empty list, not a parse error.

use serde::{Deserialize, Serialize};

/// Response from `stopsbylocation`: stops ordered by proximity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopsByLocation {
    /// Stops nearest-first; the upstream order is the ranking.
    #[serde(default)]
    pub stop: Vec<Stop>,
}

/// A transit stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub stop_id: String,

    pub stop_name: String,

    /// Aggregate station id when this stop is a platform of a larger
    /// station; empty string otherwise (upstream convention).
    #[serde(default)]
    pub parent_station: String,

    #[serde(default)]
    pub parent_station_name: String,

    /// Distance from the queried location, in miles.
    #[serde(default)]
    pub distance: Option<String>,
}

impl Stop {
    /// The id schedules should be fetched by: the parent station when
    /// present (parents aggregate sub-platform schedules), else this stop.
    pub fn schedule_stop_id(&self) -> &str {
        if self.parent_station.is_empty() {
            &self.stop_id
        } else {
            &self.parent_station
        }
    }
}

/// Response from `routesbystop`: the mode → route tree serving a stop.
/// Directions and trips are not populated by this call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRoutes {
    #[serde(default)]
    pub stop_id: String,

    #[serde(default)]
    pub stop_name: String,

    #[serde(default)]
    pub mode: Vec<Mode>,
}

/// Response from `schedulebystop`: upcoming trips at a stop, grouped by
/// mode → route → direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopSchedule {
    #[serde(default)]
    pub stop_id: String,

    #[serde(default)]
    pub stop_name: String,

    #[serde(default)]
    pub mode: Vec<Mode>,
}

/// A transit category (Subway, Bus, ...) grouping routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    #[serde(default)]
    pub route_type: String,

    pub mode_name: String,

    #[serde(default)]
    pub route: Vec<Route>,
}

/// A route within a mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub route_id: String,

    pub route_name: String,

    #[serde(default)]
    pub direction: Vec<Direction>,
}

/// One travel direction of a route, with its upcoming trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// Numeric id as a string ("0" or "1").
    pub direction_id: String,

    pub direction_name: String,

    #[serde(default)]
    pub trip: Vec<Trip>,
}

impl Direction {
    /// The direction id as an integer, if it parses.
    pub fn id_number(&self) -> Option<i64> {
        self.direction_id.trim().parse().ok()
    }
}

/// An upcoming trip in a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub trip_id: String,

    #[serde(default)]
    pub trip_name: Option<String>,

    /// Destination text displayed on the vehicle.
    #[serde(default)]
    pub trip_headsign: Option<String>,

    /// Scheduled arrival, epoch seconds as a string.
    #[serde(default)]
    pub sch_arr_dt: Option<String>,

    /// Scheduled departure, epoch seconds as a string.
    #[serde(default)]
    pub sch_dep_dt: Option<String>,

    /// Predicted arrival, when realtime data is available.
    #[serde(default)]
    pub pre_dt: Option<String>,

    /// Seconds until predicted arrival.
    #[serde(default)]
    pub pre_away: Option<String>,
}

impl Trip {
    /// Scheduled arrival as an integer timestamp, if present and parsable.
    pub fn scheduled_arrival(&self) -> Option<i64> {
        self.sch_arr_dt.as_deref()?.trim().parse().ok()
    }
}

/// Response from `schedulebytrip`: the resolved record for one trip.
/// This is what the trip cache stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDetails {
    #[serde(default)]
    pub trip_id: String,

    #[serde(default)]
    pub trip_name: Option<String>,

    #[serde(default)]
    pub trip_headsign: Option<String>,

    #[serde(default)]
    pub route_id: Option<String>,

    #[serde(default)]
    pub route_name: Option<String>,

    #[serde(default)]
    pub direction_id: Option<String>,

    #[serde(default)]
    pub direction_name: Option<String>,
}
