//! Nominatim-style geocoding HTTP client.

use serde::Deserialize;

use super::error::GeocodeError;

/// Default base URL for the geocoding service.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim requires an identifying User-Agent.
const DEFAULT_USER_AGENT: &str = "transit-server";

/// One match in the geocoding response. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct GeocodeMatch {
    lat: String,
    lon: String,
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Base URL for the search endpoint
    pub base_url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocodeConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the User-Agent header value.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the geocoding service.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    /// Create a new geocoding client.
    pub fn new(config: GeocodeConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Look up coordinates for a free-text address.
    ///
    /// Returns `None` when the service has no match for the address.
    pub async fn geocode(&self, address: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;

        let matches: Vec<GeocodeMatch> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        let Some(first) = matches.into_iter().next() else {
            return Ok(None);
        };

        match (first.lat.parse::<f64>(), first.lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => Ok(Some((lat, lon))),
            _ => Err(GeocodeError::Json {
                message: format!(
                    "non-numeric coordinates in geocoding response: ({}, {})",
                    first.lat, first.lon
                ),
            }),
        }
    }
}
