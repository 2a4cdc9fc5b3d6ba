//! Upstream client error types.

use crate::geocode::GeocodeError;
use crate::store::StoreError;

/// Errors from the upstream transit data service and its collaborators.
///
/// Network and non-2xx failures carry the service name and the request
/// parameters (API key redacted) so callers can log what was being asked
/// for; they are never converted to an empty result.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("{service} request failed ({params}): {source}")]
    Http {
        service: String,
        params: String,
        #[source]
        source: reqwest::Error,
    },

    /// API returned an error status code
    #[error("{service} returned {status} ({params}): {message}")]
    Status {
        service: String,
        params: String,
        status: u16,
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("{service} response parse error ({params}): {message}")]
    Json {
        service: String,
        params: String,
        message: String,
    },

    /// Failed to construct the HTTP client
    #[error("client construction failed: {0}")]
    Build(#[source] reqwest::Error),

    /// Cache write (or unrecoverable cache access) failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Geocoding service failed
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_carries_service_and_params() {
        let err = UpstreamError::Status {
            service: "schedulebystop".to_string(),
            params: "stop=70061&datetime=1467138500".to_string(),
            status: 500,
            message: "Internal Server Error".to_string(),
        };

        let text = err.to_string();
        assert!(text.contains("schedulebystop"));
        assert!(text.contains("stop=70061"));
        assert!(text.contains("500"));
    }
}
