//! Line and direction matching.

use crate::mbta::StopSchedule;

/// Normalize a route display name for line matching: trim, lowercase, and
/// strip one trailing "line" token. "Red Line" becomes "red"; "Mainline"
/// stays "mainline" (not a separate token).
pub(crate) fn line_key(route_name: &str) -> String {
    let lower = route_name.trim().to_lowercase();

    match lower.strip_suffix("line") {
        Some(rest) if rest.is_empty() || rest.ends_with(char::is_whitespace) => {
            rest.trim_end().to_string()
        }
        _ => lower,
    }
}

/// Whether a route display name matches a line filter, case-insensitively.
pub(crate) fn line_matches(route_name: &str, filter: &str) -> bool {
    line_key(route_name) == filter.trim().to_lowercase()
}

/// A direction filter: either the numeric direction id, or a fragment of a
/// display name.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DirectionFilter {
    Id(i64),
    Name(String),
}

impl DirectionFilter {
    pub(crate) fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse() {
            Ok(id) => DirectionFilter::Id(id),
            Err(_) => DirectionFilter::Name(trimmed.to_lowercase()),
        }
    }
}

/// Whether a schedule satisfies a direction filter.
///
/// Numeric filters require an exact match against the integer direction
/// ids among the schedule's routes of the given mode. Name filters accept
/// when the stop display name, or any direction display name of the mode,
/// contains the fragment case-insensitively.
pub(crate) fn direction_matches(
    schedule: &StopSchedule,
    mode_name: &str,
    stop_name: &str,
    filter: &DirectionFilter,
) -> bool {
    let mut directions = schedule
        .mode
        .iter()
        .filter(|m| m.mode_name == mode_name)
        .flat_map(|m| &m.route)
        .flat_map(|r| &r.direction);

    match filter {
        DirectionFilter::Id(id) => directions.any(|d| d.id_number() == Some(*id)),
        DirectionFilter::Name(fragment) => {
            stop_name.to_lowercase().contains(fragment)
                || directions.any(|d| d.direction_name.to_lowercase().contains(fragment))
        }
    }
}
