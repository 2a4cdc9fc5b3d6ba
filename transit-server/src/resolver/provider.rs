//! Provider seam between the resolver and the upstream client.

use std::future::Future;

use crate::mbta::{StopRoutes, StopSchedule, StopsByLocation, TripDetails, UpstreamError};

/// Upstream data source for resolution calls.
///
/// `MbtaClient` is the production implementation; tests substitute fixture
/// data. Only the operations the resolver actually walks are part of the
/// seam.
pub trait TransitProvider {
    /// Resolve a free-text address to coordinates, or `None` when the
    /// geocoder has no match.
    fn resolve_address(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<(f64, f64)>, UpstreamError>> + Send;

    /// Stops near a coordinate, nearest first. The returned order is the
    /// ranking; the resolver never re-sorts.
    fn stops_by_location(
        &self,
        lat: f64,
        lon: f64,
    ) -> impl Future<Output = Result<StopsByLocation, UpstreamError>> + Send;

    /// Routes serving a stop (directions and trips unpopulated).
    fn routes_by_stop(
        &self,
        stop_id: &str,
    ) -> impl Future<Output = Result<StopRoutes, UpstreamError>> + Send;

    /// Upcoming trips at a stop, optionally at a given time.
    fn schedule_by_stop(
        &self,
        stop_id: &str,
        at_time: Option<i64>,
    ) -> impl Future<Output = Result<StopSchedule, UpstreamError>> + Send;

    /// The resolved record for a trip, or `None` for an unknown trip id.
    fn lookup_trip(
        &self,
        trip_id: &str,
    ) -> impl Future<Output = Result<Option<TripDetails>, UpstreamError>> + Send;
}
