//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::resolver::{Criteria, DepartureRecord};

/// Query for the departure endpoints.
///
/// All fields arrive as strings; browsers send empty strings for untouched
/// form fields, which count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct DepartureQuery {
    /// Latitude, used with `lon` when no address is given
    pub lat: Option<String>,

    /// Longitude
    pub lon: Option<String>,

    /// Free-text address; takes precedence over coordinates
    pub address: Option<String>,

    /// Schedule lookup time, epoch seconds (absent means "now")
    pub dt: Option<String>,

    /// Direction filter: a numeric direction id or a name fragment
    pub direction: Option<String>,

    /// Line filter, e.g. "red"
    pub line: Option<String>,
}

impl DepartureQuery {
    /// The requested location: a non-empty address wins, else both
    /// coordinates must be present and parse.
    pub fn location(&self) -> Result<Location, String> {
        if let Some(address) = present(&self.address) {
            return Ok(Location::address(address));
        }

        match (present(&self.lat), present(&self.lon)) {
            (Some(lat), Some(lon)) => {
                let lat = lat.parse().map_err(|_| format!("invalid lat: {lat}"))?;
                let lon = lon.parse().map_err(|_| format!("invalid lon: {lon}"))?;
                Ok(Location::coordinate(lat, lon))
            }
            _ => Err("provide either address or both lat and lon".to_string()),
        }
    }

    /// Filter criteria from the optional query fields.
    pub fn criteria(&self) -> Result<Criteria, String> {
        let mut criteria = Criteria::new();

        if let Some(line) = present(&self.line) {
            criteria = criteria.with_line(line);
        }
        if let Some(direction) = present(&self.direction) {
            criteria = criteria.with_direction(direction);
        }
        if let Some(dt) = present(&self.dt) {
            let epoch = dt.parse().map_err(|_| format!("invalid dt: {dt}"))?;
            criteria = criteria.at_time(epoch);
        }

        Ok(criteria)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Response for `/api/next_trains`.
#[derive(Debug, Serialize)]
pub struct NextTrainsResponse {
    /// Departure records for every surviving route, possibly empty
    pub all_trains: Vec<DepartureRecord>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_takes_precedence_over_coordinates() {
        let query = DepartureQuery {
            lat: Some("42.35".to_string()),
            lon: Some("-71.06".to_string()),
            address: Some("700 Boylston St".to_string()),
            ..DepartureQuery::default()
        };

        assert_eq!(
            query.location().unwrap(),
            Location::address("700 Boylston St")
        );
    }

    #[test]
    fn coordinates_parse_when_no_address() {
        let query = DepartureQuery {
            lat: Some("42.35".to_string()),
            lon: Some("-71.06".to_string()),
            ..DepartureQuery::default()
        };

        assert_eq!(
            query.location().unwrap(),
            Location::coordinate(42.35, -71.06)
        );
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let query = DepartureQuery {
            lat: Some("42.35".to_string()),
            lon: Some("-71.06".to_string()),
            address: Some("".to_string()),
            line: Some("".to_string()),
            direction: Some("  ".to_string()),
            dt: Some("".to_string()),
        };

        assert_eq!(
            query.location().unwrap(),
            Location::coordinate(42.35, -71.06)
        );

        let criteria = query.criteria().unwrap();
        assert_eq!(criteria.line, None);
        assert_eq!(criteria.direction, None);
        assert_eq!(criteria.at_time, None);
    }

    #[test]
    fn missing_location_is_an_error() {
        let query = DepartureQuery {
            lat: Some("42.35".to_string()),
            ..DepartureQuery::default()
        };
        assert!(query.location().is_err());
    }

    #[test]
    fn invalid_numbers_are_errors() {
        let query = DepartureQuery {
            lat: Some("north".to_string()),
            lon: Some("-71.06".to_string()),
            ..DepartureQuery::default()
        };
        assert!(query.location().is_err());

        let query = DepartureQuery {
            dt: Some("tomorrow".to_string()),
            ..DepartureQuery::default()
        };
        assert!(query.criteria().is_err());
    }

    #[test]
    fn criteria_carries_filters() {
        let query = DepartureQuery {
            line: Some("red".to_string()),
            direction: Some("0".to_string()),
            dt: Some("1467138500".to_string()),
            ..DepartureQuery::default()
        };

        let criteria = query.criteria().unwrap();
        assert_eq!(criteria.mode, "Subway");
        assert_eq!(criteria.line.as_deref(), Some("red"));
        assert_eq!(criteria.direction.as_deref(), Some("0"));
        assert_eq!(criteria.at_time, Some(1467138500));
    }
}
