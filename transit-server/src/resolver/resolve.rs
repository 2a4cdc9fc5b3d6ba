//! The lookup-and-join pipeline.

use serde::Serialize;

use crate::location::Location;
use crate::mbta::{Route, Stop, StopSchedule, Trip, UpstreamError};

use super::filters::{self, DirectionFilter};
use super::provider::TransitProvider;

/// Default mode filter when the caller does not supply one.
const DEFAULT_MODE: &str = "Subway";

/// Request-scoped filter criteria. Never persisted.
#[derive(Debug, Clone)]
pub struct Criteria {
    /// Mode name the stop must serve (exact match).
    pub mode: String,

    /// Line filter, matched against normalized route names.
    pub line: Option<String>,

    /// Direction filter: a numeric direction id or a display-name fragment.
    pub direction: Option<String>,

    /// Point-in-time for schedule lookups, epoch seconds. Absent means
    /// "now".
    pub at_time: Option<i64>,
}

impl Criteria {
    /// Criteria with the default mode and no filters.
    pub fn new() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            line: None,
            direction: None,
            at_time: None,
        }
    }

    /// Set the mode filter.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Set the line filter.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }

    /// Set the direction filter.
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Set the schedule lookup time.
    pub fn at_time(mut self, epoch_secs: i64) -> Self {
        self.at_time = Some(epoch_secs);
        self
    }
}

impl Default for Criteria {
    fn default() -> Self {
        Self::new()
    }
}

/// A route at the resolved stop that survived line/direction filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDeparture {
    pub stop_id: String,
    pub stop_name: String,
    pub route: Route,
}

/// Upcoming departures for one route at the resolved stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartureRecord {
    pub stop_id: String,
    pub stop_name: String,
    pub route_id: String,
    pub route_name: String,

    /// Destination text of the first trip of the first listed direction;
    /// absent when the route has no upcoming directions.
    pub headsign: Option<String>,

    /// One entry per direction with upcoming trips.
    pub direction: Vec<DirectionDeparture>,
}

/// The next trip in one direction of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionDeparture {
    pub direction_id: String,
    pub direction_name: String,
    pub trip: Trip,
}

/// The single earliest upcoming departure across all surviving routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextTrain {
    pub stop_id: String,
    pub stop_name: String,
    pub route_id: String,
    pub route_name: String,
    pub headsign: Option<String>,
    pub direction_id: String,
    pub direction_name: String,
    pub trip: Trip,
}

/// Resolution pipeline over a [`TransitProvider`].
#[derive(Debug, Clone)]
pub struct Resolver<P> {
    provider: P,
}

impl<P: TransitProvider> Resolver<P> {
    /// Create a resolver over the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Find the nearest stop satisfying all active filters.
    ///
    /// Stops are considered in upstream proximity order; the first stop
    /// passing every filter wins, with no re-sorting. Returns `None` when
    /// no stop qualifies or the location cannot be resolved.
    pub async fn closest_stop(
        &self,
        loc: &Location,
        criteria: &Criteria,
    ) -> Result<Option<Stop>, UpstreamError> {
        let Some((lat, lon)) = self.coordinates(loc).await? else {
            return Ok(None);
        };

        let nearby = self.provider.stops_by_location(lat, lon).await?;

        for stop in nearby.stop {
            let routes = self.provider.routes_by_stop(&stop.stop_id).await?;

            if !routes.mode.iter().any(|m| m.mode_name == criteria.mode) {
                continue;
            }

            if let Some(line) = &criteria.line {
                let matched = routes
                    .mode
                    .iter()
                    .filter(|m| m.mode_name == criteria.mode)
                    .flat_map(|m| &m.route)
                    .any(|r| filters::line_matches(&r.route_name, line));

                if !matched {
                    continue;
                }
            }

            if let Some(direction) = &criteria.direction {
                let schedule = self
                    .provider
                    .schedule_by_stop(&stop.stop_id, criteria.at_time)
                    .await?;

                let filter = DirectionFilter::parse(direction);
                if !filters::direction_matches(&schedule, &criteria.mode, &stop.stop_name, &filter)
                {
                    continue;
                }
            }

            return Ok(Some(stop));
        }

        Ok(None)
    }

    /// The schedule at the nearest qualifying stop.
    ///
    /// Fetched by the stop's parent station when it has one (parents
    /// aggregate sub-platform schedules), else by the stop itself.
    pub async fn nearby_schedule(
        &self,
        loc: &Location,
        criteria: &Criteria,
    ) -> Result<Option<StopSchedule>, UpstreamError> {
        let Some(stop) = self.closest_stop(loc, criteria).await? else {
            return Ok(None);
        };

        let schedule = self
            .provider
            .schedule_by_stop(stop.schedule_stop_id(), criteria.at_time)
            .await?;

        Ok(Some(schedule))
    }

    /// The routes of the criteria mode at the nearest qualifying stop that
    /// individually pass the line and direction filters.
    ///
    /// Re-validation is intentionally redundant with stop selection: a
    /// stop can qualify via one route while other routes at the same stop
    /// do not.
    pub async fn next_routes(
        &self,
        loc: &Location,
        criteria: &Criteria,
    ) -> Result<Vec<RouteDeparture>, UpstreamError> {
        let Some(schedule) = self.nearby_schedule(loc, criteria).await? else {
            return Ok(Vec::new());
        };

        if let Some(direction) = &criteria.direction {
            let filter = DirectionFilter::parse(direction);
            if !filters::direction_matches(&schedule, &criteria.mode, &schedule.stop_name, &filter)
            {
                return Ok(Vec::new());
            }
        }

        let mut surviving = Vec::new();

        for mode in schedule.mode.iter().filter(|m| m.mode_name == criteria.mode) {
            for route in &mode.route {
                if let Some(line) = &criteria.line
                    && !filters::line_matches(&route.route_name, line)
                {
                    continue;
                }

                surviving.push(RouteDeparture {
                    stop_id: schedule.stop_id.clone(),
                    stop_name: schedule.stop_name.clone(),
                    route: route.clone(),
                });
            }
        }

        Ok(surviving)
    }

    /// One departure record per surviving route: stop and route identity,
    /// the headsign of the first upcoming trip, and the next trip in each
    /// direction.
    pub async fn next_trains(
        &self,
        loc: &Location,
        criteria: &Criteria,
    ) -> Result<Vec<DepartureRecord>, UpstreamError> {
        let routes = self.next_routes(loc, criteria).await?;
        let mut records = Vec::with_capacity(routes.len());

        for departure in routes {
            let route = departure.route;

            let headsign = match route.direction.first().and_then(|d| d.trip.first()) {
                Some(first_trip) => self
                    .provider
                    .lookup_trip(&first_trip.trip_id)
                    .await?
                    .and_then(|details| details.trip_headsign),
                None => None,
            };

            let direction = route
                .direction
                .iter()
                .filter_map(|d| {
                    d.trip.first().map(|t| DirectionDeparture {
                        direction_id: d.direction_id.clone(),
                        direction_name: d.direction_name.clone(),
                        trip: t.clone(),
                    })
                })
                .collect();

            records.push(DepartureRecord {
                stop_id: departure.stop_id,
                stop_name: departure.stop_name,
                route_id: route.route_id,
                route_name: route.route_name,
                headsign,
                direction,
            });
        }

        Ok(records)
    }

    /// The single earliest departure across all surviving routes, compared
    /// by scheduled arrival ascending. Trips without a parsable arrival
    /// time are skipped; `None` when nothing remains.
    pub async fn next_train(
        &self,
        loc: &Location,
        criteria: &Criteria,
    ) -> Result<Option<NextTrain>, UpstreamError> {
        let records = self.next_trains(loc, criteria).await?;
        let mut best: Option<(i64, NextTrain)> = None;

        for record in records {
            // Earliest trip within this record first, then compare across
            // records by the same ordering.
            let mut record_best: Option<(i64, &DirectionDeparture)> = None;

            for entry in &record.direction {
                let Some(arrival) = entry.trip.scheduled_arrival() else {
                    continue;
                };
                if record_best.is_none_or(|(current, _)| arrival < current) {
                    record_best = Some((arrival, entry));
                }
            }

            let Some((arrival, entry)) = record_best else {
                continue;
            };

            if best.as_ref().is_none_or(|(current, _)| arrival < *current) {
                best = Some((
                    arrival,
                    NextTrain {
                        stop_id: record.stop_id.clone(),
                        stop_name: record.stop_name.clone(),
                        route_id: record.route_id.clone(),
                        route_name: record.route_name.clone(),
                        headsign: record.headsign.clone(),
                        direction_id: entry.direction_id.clone(),
                        direction_name: entry.direction_name.clone(),
                        trip: entry.trip.clone(),
                    },
                ));
            }
        }

        Ok(best.map(|(_, train)| train))
    }

    async fn coordinates(&self, loc: &Location) -> Result<Option<(f64, f64)>, UpstreamError> {
        match loc {
            Location::Coordinate { lat, lon } => Ok(Some((*lat, *lon))),
            Location::Address(text) => self.provider.resolve_address(text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mbta::{Direction, Mode, StopRoutes, StopsByLocation, TripDetails};
    use std::collections::HashMap;

    /// In-memory provider serving canned responses.
    #[derive(Debug, Clone, Default)]
    struct Fixture {
        coords: Option<(f64, f64)>,
        stops: Vec<Stop>,
        routes: HashMap<String, StopRoutes>,
        schedules: HashMap<String, StopSchedule>,
        trips: HashMap<String, TripDetails>,
    }

    impl TransitProvider for Fixture {
        async fn resolve_address(
            &self,
            _address: &str,
        ) -> Result<Option<(f64, f64)>, UpstreamError> {
            Ok(self.coords)
        }

        async fn stops_by_location(
            &self,
            _lat: f64,
            _lon: f64,
        ) -> Result<StopsByLocation, UpstreamError> {
            Ok(StopsByLocation {
                stop: self.stops.clone(),
            })
        }

        async fn routes_by_stop(&self, stop_id: &str) -> Result<StopRoutes, UpstreamError> {
            Ok(self.routes.get(stop_id).cloned().unwrap_or(StopRoutes {
                stop_id: stop_id.to_string(),
                stop_name: String::new(),
                mode: Vec::new(),
            }))
        }

        async fn schedule_by_stop(
            &self,
            stop_id: &str,
            _at_time: Option<i64>,
        ) -> Result<StopSchedule, UpstreamError> {
            Ok(self.schedules.get(stop_id).cloned().unwrap_or(StopSchedule {
                stop_id: stop_id.to_string(),
                stop_name: String::new(),
                mode: Vec::new(),
            }))
        }

        async fn lookup_trip(&self, trip_id: &str) -> Result<Option<TripDetails>, UpstreamError> {
            Ok(self.trips.get(trip_id).cloned())
        }
    }

    fn stop(id: &str, name: &str, parent: &str) -> Stop {
        Stop {
            stop_id: id.to_string(),
            stop_name: name.to_string(),
            parent_station: parent.to_string(),
            parent_station_name: String::new(),
            distance: None,
        }
    }

    fn mode(mode_name: &str, routes: Vec<Route>) -> Mode {
        Mode {
            route_type: String::new(),
            mode_name: mode_name.to_string(),
            route: routes,
        }
    }

    fn route(id: &str, name: &str, directions: Vec<Direction>) -> Route {
        Route {
            route_id: id.to_string(),
            route_name: name.to_string(),
            direction: directions,
        }
    }

    fn direction(id: &str, name: &str, trips: Vec<Trip>) -> Direction {
        Direction {
            direction_id: id.to_string(),
            direction_name: name.to_string(),
            trip: trips,
        }
    }

    fn trip(id: &str, arr: &str) -> Trip {
        Trip {
            trip_id: id.to_string(),
            trip_name: None,
            trip_headsign: None,
            sch_arr_dt: Some(arr.to_string()),
            sch_dep_dt: None,
            pre_dt: None,
            pre_away: None,
        }
    }

    fn subway_routes(stop_id: &str, routes: Vec<Route>) -> StopRoutes {
        StopRoutes {
            stop_id: stop_id.to_string(),
            stop_name: String::new(),
            mode: vec![mode("Subway", routes)],
        }
    }

    fn here() -> Location {
        Location::coordinate(42.35, -71.06)
    }

    #[tokio::test]
    async fn first_stop_satisfying_mode_filter_wins() {
        let mut fixture = Fixture {
            stops: vec![stop("A", "Stop A", ""), stop("B", "Stop B", ""), stop("C", "Stop C", "")],
            ..Fixture::default()
        };
        fixture.routes.insert(
            "A".to_string(),
            StopRoutes {
                stop_id: "A".to_string(),
                stop_name: String::new(),
                mode: vec![mode("Bus", vec![route("1", "Silver", Vec::new())])],
            },
        );
        fixture
            .routes
            .insert("B".to_string(), subway_routes("B", vec![route("Red", "Red Line", Vec::new())]));
        fixture
            .routes
            .insert("C".to_string(), subway_routes("C", vec![route("Red", "Red Line", Vec::new())]));

        let resolver = Resolver::new(fixture);
        let found = resolver
            .closest_stop(&here(), &Criteria::new())
            .await
            .unwrap();

        // A is nearer but serves no Subway; B beats C on proximity order.
        assert_eq!(found.unwrap().stop_id, "B");
    }

    #[tokio::test]
    async fn line_filter_rejects_stops_without_the_line() {
        let mut fixture = Fixture {
            stops: vec![stop("A", "Stop A", ""), stop("B", "Stop B", "")],
            ..Fixture::default()
        };
        fixture.routes.insert(
            "A".to_string(),
            subway_routes("A", vec![route("Orange", "Orange Line", Vec::new())]),
        );
        fixture.routes.insert(
            "B".to_string(),
            subway_routes("B", vec![route("Red", "Red Line", Vec::new())]),
        );

        let resolver = Resolver::new(fixture);

        for filter in ["red", "RED"] {
            let found = resolver
                .closest_stop(&here(), &Criteria::new().with_line(filter))
                .await
                .unwrap();
            assert_eq!(found.as_ref().map(|s| s.stop_id.as_str()), Some("B"));
        }
    }

    #[tokio::test]
    async fn numeric_direction_filter_requires_matching_id() {
        let mut fixture = Fixture {
            stops: vec![stop("A", "Stop A", "")],
            ..Fixture::default()
        };
        fixture.routes.insert(
            "A".to_string(),
            subway_routes("A", vec![route("Red", "Red Line", Vec::new())]),
        );
        fixture.schedules.insert(
            "A".to_string(),
            StopSchedule {
                stop_id: "A".to_string(),
                stop_name: "Stop A".to_string(),
                mode: vec![mode(
                    "Subway",
                    vec![route(
                        "Red",
                        "Red Line",
                        vec![direction("1", "Northbound", Vec::new())],
                    )],
                )],
            },
        );

        let resolver = Resolver::new(fixture);

        let found = resolver
            .closest_stop(&here(), &Criteria::new().with_direction("1"))
            .await
            .unwrap();
        assert!(found.is_some());

        let found = resolver
            .closest_stop(&here(), &Criteria::new().with_direction("0"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn name_direction_filter_matches_route_or_stop_name() {
        let mut fixture = Fixture {
            stops: vec![stop("A", "Outbound Plaza", "")],
            ..Fixture::default()
        };
        fixture.routes.insert(
            "A".to_string(),
            subway_routes("A", vec![route("Red", "Red Line", Vec::new())]),
        );
        fixture.schedules.insert(
            "A".to_string(),
            StopSchedule {
                stop_id: "A".to_string(),
                stop_name: "Outbound Plaza".to_string(),
                mode: vec![mode(
                    "Subway",
                    vec![route(
                        "Red",
                        "Red Line",
                        vec![direction("0", "Southbound", Vec::new())],
                    )],
                )],
            },
        );

        let resolver = Resolver::new(fixture);

        // Matches a direction display name.
        let found = resolver
            .closest_stop(&here(), &Criteria::new().with_direction("south"))
            .await
            .unwrap();
        assert!(found.is_some());

        // No direction contains "outbound", but the stop name does.
        let found = resolver
            .closest_stop(&here(), &Criteria::new().with_direction("outbound"))
            .await
            .unwrap();
        assert!(found.is_some());

        let found = resolver
            .closest_stop(&here(), &Criteria::new().with_direction("westbound"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn unresolvable_address_yields_no_stop() {
        let fixture = Fixture {
            coords: None,
            stops: vec![stop("A", "Stop A", "")],
            ..Fixture::default()
        };

        let resolver = Resolver::new(fixture);
        let found = resolver
            .closest_stop(&Location::address("nowhere at all"), &Criteria::new())
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn nearby_schedule_fetches_by_parent_station() {
        let mut fixture = Fixture {
            stops: vec![stop("70061", "Alewife", "place-alfcl")],
            ..Fixture::default()
        };
        fixture.routes.insert(
            "70061".to_string(),
            subway_routes("70061", vec![route("Red", "Red Line", Vec::new())]),
        );
        fixture.schedules.insert(
            "place-alfcl".to_string(),
            StopSchedule {
                stop_id: "place-alfcl".to_string(),
                stop_name: "Alewife Station".to_string(),
                mode: vec![mode("Subway", vec![route("Red", "Red Line", Vec::new())])],
            },
        );

        let resolver = Resolver::new(fixture);
        let schedule = resolver
            .nearby_schedule(&here(), &Criteria::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(schedule.stop_id, "place-alfcl");
    }

    #[tokio::test]
    async fn next_routes_revalidates_line_per_route() {
        let mut fixture = Fixture {
            stops: vec![stop("A", "Stop A", "")],
            ..Fixture::default()
        };
        // The stop qualifies for line "red" via Red Line, but Orange Line
        // shares the stop and must be filtered out individually.
        fixture.routes.insert(
            "A".to_string(),
            subway_routes(
                "A",
                vec![
                    route("Red", "Red Line", Vec::new()),
                    route("Orange", "Orange Line", Vec::new()),
                ],
            ),
        );
        fixture.schedules.insert(
            "A".to_string(),
            StopSchedule {
                stop_id: "A".to_string(),
                stop_name: "Stop A".to_string(),
                mode: vec![mode(
                    "Subway",
                    vec![
                        route("Red", "Red Line", vec![direction("0", "Southbound", vec![trip("T1", "100")])]),
                        route("Orange", "Orange Line", vec![direction("0", "Southbound", vec![trip("T2", "50")])]),
                    ],
                )],
            },
        );

        let resolver = Resolver::new(fixture);
        let surviving = resolver
            .next_routes(&here(), &Criteria::new().with_line("red"))
            .await
            .unwrap();

        assert_eq!(surviving.len(), 1);
        assert_eq!(surviving[0].route.route_id, "Red");
        assert_eq!(surviving[0].stop_id, "A");
        assert_eq!(surviving[0].stop_name, "Stop A");
    }

    #[tokio::test]
    async fn next_trains_resolves_headsign_and_directions() {
        let mut fixture = Fixture {
            stops: vec![stop("A", "Stop A", "")],
            ..Fixture::default()
        };
        fixture.routes.insert(
            "A".to_string(),
            subway_routes("A", vec![route("Red", "Red Line", Vec::new())]),
        );
        fixture.schedules.insert(
            "A".to_string(),
            StopSchedule {
                stop_id: "A".to_string(),
                stop_name: "Stop A".to_string(),
                mode: vec![mode(
                    "Subway",
                    vec![
                        route(
                            "Red",
                            "Red Line",
                            vec![
                                direction("0", "Southbound", vec![trip("T1", "100")]),
                                direction("1", "Northbound", vec![trip("T2", "200")]),
                            ],
                        ),
                        // A route with no upcoming directions.
                        route("Orange", "Orange Line", Vec::new()),
                    ],
                )],
            },
        );
        fixture.trips.insert(
            "T1".to_string(),
            TripDetails {
                trip_id: "T1".to_string(),
                trip_name: None,
                trip_headsign: Some("Ashmont".to_string()),
                route_id: Some("Red".to_string()),
                route_name: Some("Red Line".to_string()),
                direction_id: Some("0".to_string()),
                direction_name: Some("Southbound".to_string()),
            },
        );

        let resolver = Resolver::new(fixture);
        let records = resolver.next_trains(&here(), &Criteria::new()).await.unwrap();

        assert_eq!(records.len(), 2);

        let red = &records[0];
        assert_eq!(red.route_id, "Red");
        assert_eq!(red.headsign.as_deref(), Some("Ashmont"));
        assert_eq!(red.direction.len(), 2);
        assert_eq!(red.direction[0].trip.trip_id, "T1");
        assert_eq!(red.direction[1].trip.trip_id, "T2");

        let orange = &records[1];
        assert_eq!(orange.headsign, None);
        assert!(orange.direction.is_empty());
    }

    #[tokio::test]
    async fn next_train_selects_global_earliest_arrival() {
        let mut fixture = Fixture {
            stops: vec![stop("S1", "Stop One", "")],
            ..Fixture::default()
        };
        fixture.routes.insert(
            "S1".to_string(),
            subway_routes(
                "S1",
                vec![route("R1", "R1", Vec::new()), route("R2", "R2", Vec::new())],
            ),
        );
        fixture.schedules.insert(
            "S1".to_string(),
            StopSchedule {
                stop_id: "S1".to_string(),
                stop_name: "Stop One".to_string(),
                mode: vec![mode(
                    "Subway",
                    vec![
                        route("R1", "R1", vec![direction("0", "Southbound", vec![trip("T1", "100")])]),
                        route("R2", "R2", vec![direction("1", "Northbound", vec![trip("T2", "50")])]),
                    ],
                )],
            },
        );

        let resolver = Resolver::new(fixture);
        let train = resolver
            .next_train(&here(), &Criteria::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(train.trip.trip_id, "T2");
        assert_eq!(train.trip.sch_arr_dt.as_deref(), Some("50"));
        assert_eq!(train.route_id, "R2");
        assert_eq!(train.direction_name, "Northbound");
    }

    #[tokio::test]
    async fn next_train_skips_unparsable_arrivals() {
        let mut fixture = Fixture {
            stops: vec![stop("A", "Stop A", "")],
            ..Fixture::default()
        };
        fixture.routes.insert(
            "A".to_string(),
            subway_routes("A", vec![route("Red", "Red Line", Vec::new())]),
        );

        let mut bad_trip = trip("T1", "soon");
        bad_trip.sch_arr_dt = Some("soon".to_string());
        let mut missing_trip = trip("T2", "");
        missing_trip.sch_arr_dt = None;

        fixture.schedules.insert(
            "A".to_string(),
            StopSchedule {
                stop_id: "A".to_string(),
                stop_name: "Stop A".to_string(),
                mode: vec![mode(
                    "Subway",
                    vec![route(
                        "Red",
                        "Red Line",
                        vec![
                            direction("0", "Southbound", vec![bad_trip]),
                            direction("1", "Northbound", vec![missing_trip]),
                        ],
                    )],
                )],
            },
        );

        let resolver = Resolver::new(fixture);
        let train = resolver.next_train(&here(), &Criteria::new()).await.unwrap();

        assert!(train.is_none());
    }

    #[tokio::test]
    async fn absence_propagates_without_error() {
        let fixture = Fixture {
            stops: Vec::new(),
            ..Fixture::default()
        };
        let resolver = Resolver::new(fixture);
        let criteria = Criteria::new();

        assert!(resolver.closest_stop(&here(), &criteria).await.unwrap().is_none());
        assert!(resolver.nearby_schedule(&here(), &criteria).await.unwrap().is_none());
        assert!(resolver.next_routes(&here(), &criteria).await.unwrap().is_empty());
        assert!(resolver.next_trains(&here(), &criteria).await.unwrap().is_empty());
        assert!(resolver.next_train(&here(), &criteria).await.unwrap().is_none());
    }
}
