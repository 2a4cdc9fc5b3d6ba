//! MBTA-realtime HTTP client.
//!
//! Builds canonical request URLs, applies the caching policy, and exposes
//! one wrapper per upstream service. Schedule lookups (anything carrying
//! the point-in-time `datetime` parameter) are dispatched live on every
//! call; all other requests are cached by canonical URL in the persistent
//! request collection.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::geocode::GeocodeClient;
use crate::resolver::TransitProvider;
use crate::store::{Collection, Store, StoreError};

use super::error::UpstreamError;
use super::types::{StopRoutes, StopSchedule, StopsByLocation, TripDetails};

/// Default base URL for the MBTA-realtime API.
const DEFAULT_BASE_URL: &str = "https://realtime.mbta.com/developer/api/v2";

/// Query parameter marking a request as a point-in-time schedule lookup.
/// Requests whose parameter set carries this key are never cached.
const DATETIME_PARAM: &str = "datetime";

/// Request parameters: name plus present-or-absent value. Absent and empty
/// values are omitted from the URL entirely.
type Params<'a> = &'a [(&'a str, Option<String>)];

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// API key sent as the `api_key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MbtaConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// MBTA-realtime API client.
///
/// Owns the caching policy: consults the persistent request collection
/// before dispatching and populates it after a successful fetch, except for
/// point-in-time schedule lookups which always go live. Also resolves
/// addresses through the geocoding service (cached by normalized address)
/// and trip records through the trip collection.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    requests: Collection,
    trips: Collection,
    geocoder: GeocodeClient,
}

impl MbtaClient {
    /// Create a new client backed by the given store and geocoder.
    pub fn new(
        config: MbtaConfig,
        store: &Store,
        geocoder: GeocodeClient,
    ) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(UpstreamError::Build)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            requests: store.requests().clone(),
            trips: store.trips().clone(),
            geocoder,
        })
    }

    /// Issue a request to the given service, applying the caching policy.
    ///
    /// The canonical URL doubles as the cache key. A cache read failure
    /// degrades to a miss (the live fetch that follows repopulates it); a
    /// cache write failure propagates, since silently losing the write
    /// would desynchronize the mirror and the durable table.
    pub async fn request(&self, service: &str, params: Params<'_>) -> Result<Value, UpstreamError> {
        let url = canonical_url(&self.base_url, service, &self.api_key, params);
        let live = is_live(params);

        if !live {
            match self.requests.get(&url) {
                Ok(Some(hit)) => {
                    debug!(service, "request cache hit");
                    return Ok(hit);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(service, error = %e, "request cache read failed; fetching live");
                }
            }
        }

        let value = self.fetch(service, params, &url).await?;

        if !live {
            self.requests.put(&url, &value)?;
        }

        Ok(value)
    }

    async fn fetch(
        &self,
        service: &str,
        params: Params<'_>,
        url: &str,
    ) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| UpstreamError::Http {
                service: service.to_string(),
                params: display_params(params),
                source,
            })?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                service: service.to_string(),
                params: display_params(params),
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| UpstreamError::Http {
                service: service.to_string(),
                params: display_params(params),
                source,
            })?;

        serde_json::from_str(&body).map_err(|e| UpstreamError::Json {
            service: service.to_string(),
            params: display_params(params),
            message: e.to_string(),
        })
    }

    // Services

    /// Current server time.
    pub async fn server_time(&self) -> Result<Value, UpstreamError> {
        self.request("servertime", &[]).await
    }

    /// All routes, grouped by mode.
    pub async fn routes(&self) -> Result<Value, UpstreamError> {
        self.request("routes", &[]).await
    }

    /// Routes serving a stop.
    pub async fn routes_by_stop(&self, stop: &str) -> Result<StopRoutes, UpstreamError> {
        let value = self
            .request("routesbystop", &[("stop", Some(stop.to_string()))])
            .await?;
        decode("routesbystop", value)
    }

    /// Stops along a route.
    pub async fn stops_by_route(&self, route: &str) -> Result<Value, UpstreamError> {
        self.request("stopsbyroute", &[("route", Some(route.to_string()))])
            .await
    }

    /// Stops near a coordinate, nearest first.
    pub async fn stops_by_location(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<StopsByLocation, UpstreamError> {
        let value = self
            .request(
                "stopsbylocation",
                &[("lat", Some(lat.to_string())), ("lon", Some(lon.to_string()))],
            )
            .await?;
        decode("stopsbylocation", value)
    }

    /// Upcoming trips at a stop. `at_time` absent means "now"; either way
    /// this is a point-in-time lookup and is never cached.
    pub async fn schedule_by_stop(
        &self,
        stop: &str,
        route: Option<&str>,
        direction: Option<&str>,
        at_time: Option<i64>,
    ) -> Result<StopSchedule, UpstreamError> {
        let value = self
            .request(
                "schedulebystop",
                &[
                    ("stop", Some(stop.to_string())),
                    ("route", route.map(str::to_string)),
                    ("direction", direction.map(str::to_string)),
                    (DATETIME_PARAM, at_time.map(|t| t.to_string())),
                ],
            )
            .await?;
        decode("schedulebystop", value)
    }

    /// Upcoming trips along a route. Never cached.
    pub async fn schedule_by_route(
        &self,
        route: &str,
        direction: Option<&str>,
        at_time: Option<i64>,
    ) -> Result<Value, UpstreamError> {
        self.request(
            "schedulebyroute",
            &[
                ("route", Some(route.to_string())),
                ("direction", direction.map(str::to_string)),
                (DATETIME_PARAM, at_time.map(|t| t.to_string())),
            ],
        )
        .await
    }

    /// The resolved record for a single trip. Never cached as a request;
    /// [`MbtaClient::lookup_trip`] caches the result by trip id instead.
    pub async fn schedule_by_trip(
        &self,
        trip: &str,
        at_time: Option<i64>,
    ) -> Result<TripDetails, UpstreamError> {
        let value = self
            .request(
                "schedulebytrip",
                &[
                    ("trip", Some(trip.to_string())),
                    (DATETIME_PARAM, at_time.map(|t| t.to_string())),
                ],
            )
            .await?;
        decode("schedulebytrip", value)
    }

    /// All current alerts.
    pub async fn alerts(&self) -> Result<Value, UpstreamError> {
        self.request("alerts", &[]).await
    }

    /// Alerts affecting a route.
    pub async fn alerts_by_route(&self, route: &str) -> Result<Value, UpstreamError> {
        self.request("alertsbyroute", &[("route", Some(route.to_string()))])
            .await
    }

    /// Alerts affecting a stop.
    pub async fn alerts_by_stop(&self, stop: &str) -> Result<Value, UpstreamError> {
        self.request("alertsbystop", &[("stop", Some(stop.to_string()))])
            .await
    }

    /// A single alert by id.
    pub async fn alert_by_id(&self, alert_id: &str) -> Result<Value, UpstreamError> {
        self.request("alertbyid", &[("id", Some(alert_id.to_string()))])
            .await
    }

    /// Alias for [`MbtaClient::alert_by_id`].
    pub async fn alert(&self, alert_id: &str) -> Result<Value, UpstreamError> {
        self.alert_by_id(alert_id).await
    }

    /// Headers of all current alerts.
    pub async fn alert_headers(&self) -> Result<Value, UpstreamError> {
        self.request("alertheaders", &[]).await
    }

    /// Alert headers for a route.
    pub async fn alert_headers_by_route(&self, route: &str) -> Result<Value, UpstreamError> {
        self.request("alertheadersbyroute", &[("route", Some(route.to_string()))])
            .await
    }

    /// Alert headers for a stop.
    pub async fn alert_headers_by_stop(&self, stop: &str) -> Result<Value, UpstreamError> {
        self.request("alertheadersbystop", &[("stop", Some(stop.to_string()))])
            .await
    }

    // Composed lookups

    /// Resolve a free-text address to coordinates, caching by the trimmed,
    /// lower-cased address. An address the geocoder cannot match resolves
    /// to `None` and is not cached, so a later match remains observable.
    pub async fn resolve_address(
        &self,
        address: &str,
    ) -> Result<Option<(f64, f64)>, UpstreamError> {
        let normalized = address.trim().to_lowercase();
        if normalized.is_empty() {
            return Ok(None);
        }

        match self.requests.get(&normalized) {
            Ok(Some(cached)) => match decode_coords(&cached) {
                Some(coords) => return Ok(Some(coords)),
                None => {
                    warn!(address = %normalized, "cached coordinates undecodable; re-geocoding");
                }
            },
            Ok(None) => {}
            Err(e) => {
                warn!(address = %normalized, error = %e, "address cache read failed; geocoding live");
            }
        }

        let Some((lat, lon)) = self.geocoder.geocode(&normalized).await? else {
            return Ok(None);
        };

        self.requests
            .put(&normalized, &serde_json::json!([lat, lon]))?;

        Ok(Some((lat, lon)))
    }

    /// Look up a trip record, reading through the trip collection.
    ///
    /// On a cache miss the record is fetched live (trip schedules are
    /// point-in-time requests) and the resolved record is cached by trip
    /// id. An unknown trip id resolves to `None`.
    pub async fn lookup_trip(&self, trip_id: &str) -> Result<Option<TripDetails>, UpstreamError> {
        match self.trips.get(trip_id) {
            Ok(Some(cached)) => match serde_json::from_value::<TripDetails>(cached) {
                Ok(details) => return Ok(Some(details)),
                Err(e) => {
                    warn!(trip_id, error = %e, "cached trip record undecodable; refetching");
                }
            },
            Ok(None) => {}
            Err(e) => {
                warn!(trip_id, error = %e, "trip cache read failed; fetching live");
            }
        }

        let details = match self.schedule_by_trip(trip_id, None).await {
            Ok(details) => details,
            Err(UpstreamError::Status { status: 404, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        let value = serde_json::to_value(&details).map_err(StoreError::from)?;
        self.trips.put(trip_id, &value)?;

        Ok(Some(details))
    }
}

impl TransitProvider for MbtaClient {
    async fn resolve_address(&self, address: &str) -> Result<Option<(f64, f64)>, UpstreamError> {
        MbtaClient::resolve_address(self, address).await
    }

    async fn stops_by_location(&self, lat: f64, lon: f64) -> Result<StopsByLocation, UpstreamError> {
        MbtaClient::stops_by_location(self, lat, lon).await
    }

    async fn routes_by_stop(&self, stop_id: &str) -> Result<StopRoutes, UpstreamError> {
        MbtaClient::routes_by_stop(self, stop_id).await
    }

    async fn schedule_by_stop(
        &self,
        stop_id: &str,
        at_time: Option<i64>,
    ) -> Result<StopSchedule, UpstreamError> {
        MbtaClient::schedule_by_stop(self, stop_id, None, None, at_time).await
    }

    async fn lookup_trip(&self, trip_id: &str) -> Result<Option<TripDetails>, UpstreamError> {
        MbtaClient::lookup_trip(self, trip_id).await
    }
}

/// Build the canonical request URL: base endpoint, service name, the
/// mandatory API key, then every present parameter in the order given.
/// Absent and empty parameters are omitted entirely, so calls differing
/// only in omitted options collapse to the same cache key.
fn canonical_url(base: &str, service: &str, api_key: &str, params: Params<'_>) -> String {
    let mut url = format!("{base}/{service}?api_key={api_key}");

    for (name, value) in params {
        if let Some(value) = value
            && !value.is_empty()
        {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(value);
        }
    }

    url
}

/// Whether the parameter set marks a point-in-time schedule lookup.
/// The `datetime` key counts even when its value is absent: absent means
/// "now", which is just as time-sensitive as an explicit timestamp.
fn is_live(params: Params<'_>) -> bool {
    params.iter().any(|(name, _)| *name == DATETIME_PARAM)
}

/// Present parameters rendered for error messages, API key excluded.
fn display_params(params: Params<'_>) -> String {
    let mut out = String::new();

    for (name, value) in params {
        if let Some(value) = value
            && !value.is_empty()
        {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
    }

    out
}

fn decode<T: DeserializeOwned>(service: &str, value: Value) -> Result<T, UpstreamError> {
    serde_json::from_value(value).map_err(|e| UpstreamError::Json {
        service: service.to_string(),
        params: String::new(),
        message: e.to_string(),
    })
}

/// Coordinates are cached as a two-element `[lat, lon]` array.
fn decode_coords(value: &Value) -> Option<(f64, f64)> {
    let lat = value.get(0)?.as_f64()?;
    let lon = value.get(1)?.as_f64()?;
    Some((lat, lon))
}
