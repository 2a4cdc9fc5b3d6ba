//! Geocoding client error types.

/// Errors that can occur when interacting with the geocoding service.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error status
    #[error("geocoding service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("geocoding response parse error: {message}")]
    Json { message: String },
}
