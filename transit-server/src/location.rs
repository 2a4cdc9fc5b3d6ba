//! Location input for resolution calls.

/// Where the caller is asking about.
///
/// Resolved once at the API boundary; the resolver never guesses whether a
/// value is an address or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Free-text address, translated through the geocoding service.
    Address(String),

    /// Raw coordinate pair, used directly.
    Coordinate { lat: f64, lon: f64 },
}

impl Location {
    /// A free-text address location.
    pub fn address(text: impl Into<String>) -> Self {
        Location::Address(text.into())
    }

    /// A raw coordinate location.
    pub fn coordinate(lat: f64, lon: f64) -> Self {
        Location::Coordinate { lat, lon }
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lon): (f64, f64)) -> Self {
        Location::Coordinate { lat, lon }
    }
}
