//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Stop;
use crate::timetable::{StationEntry, TripOption, TripStatus};

/// Request to resolve the service running on a date.
#[derive(Debug, Deserialize)]
pub struct ServiceRequest {
    /// Date in YYYY-MM-DD format (defaults to today)
    pub date: Option<String>,
}

/// Response for service resolution.
#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    pub date: String,
    pub service_id: String,
}

/// Request for trips between two stations.
#[derive(Debug, Deserialize)]
pub struct TripsRequest {
    /// Date in YYYY-MM-DD format (defaults to today)
    pub date: Option<String>,

    /// Origin station id
    pub from: String,

    /// Destination station id
    pub to: String,
}

/// Where a trip is right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusResult {
    Upcoming,
    EnRoute,
    Completed,
}

impl From<TripStatus> for StatusResult {
    fn from(status: TripStatus) -> Self {
        match status {
            TripStatus::Upcoming => StatusResult::Upcoming,
            TripStatus::EnRoute => StatusResult::EnRoute,
            TripStatus::Completed => StatusResult::Completed,
        }
    }
}

/// A trip in query results.
#[derive(Debug, Serialize)]
pub struct TripResult {
    pub trip_id: String,

    /// Route and trip name (e.g., "Local #101")
    pub name: String,

    /// Time at the origin, GTFS style (may exceed 24:00:00)
    pub start: String,

    /// Time at the destination, GTFS style
    pub end: String,

    /// Human-readable duration (e.g., "1h 5m")
    pub duration: String,

    pub status: StatusResult,
}

impl TripResult {
    pub fn from_option(option: &TripOption, status: TripStatus) -> Self {
        Self {
            trip_id: option.trip_id.to_string(),
            name: option.name.clone(),
            start: option.start.to_string(),
            end: option.end.to_string(),
            duration: option.duration.clone(),
            status: status.into(),
        }
    }
}

/// Response for a trip query.
#[derive(Debug, Serialize)]
pub struct TripsResponse {
    pub date: String,
    pub service_id: String,
    pub trips: Vec<TripResult>,
}

/// A station in the station list.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,

    /// Name with configured suffixes removed
    pub name: String,

    pub lat: f64,
    pub lon: f64,
}

impl From<StationEntry<'_>> for StationResult {
    fn from(entry: StationEntry<'_>) -> Self {
        Self {
            id: entry.stop.id.to_string(),
            name: entry.display_name,
            lat: entry.stop.position.lat,
            lon: entry.stop.position.lon,
        }
    }
}

/// Response for the station list.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Request for the stop nearest to a position.
#[derive(Debug, Deserialize)]
pub struct NearestRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,

    /// Resolve platforms to their parent station
    #[serde(default)]
    pub station: bool,
}

/// Response for a nearest-stop lookup.
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub stop_id: String,
    pub name: String,
}

impl From<&Stop> for NearestResponse {
    fn from(stop: &Stop) -> Self {
        Self {
            stop_id: stop.id.to_string(),
            name: stop.name.clone(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
