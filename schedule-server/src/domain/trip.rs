//! Routes, trips and the stop times that make up a trip.

use super::{RouteId, ServiceId, ServiceTime, StopId, TripId};

/// A row of `routes.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: RouteId,
    pub long_name: String,
}

/// A row of `trips.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub id: TripId,
    pub route_id: RouteId,
    pub service_id: ServiceId,
    pub short_name: String,
}

impl Trip {
    /// Passenger-facing name, e.g. "Local #101".
    pub fn display_name(&self, route: &Route) -> String {
        format!("{} #{}", route.long_name, self.short_name)
    }
}

/// A normalized row of `stop_times.txt`.
///
/// Arrival and departure are treated as the same instant; only the arrival
/// (or the departure, when arrival is blank) is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    pub trip_id: TripId,
    pub stop_id: StopId,
    pub stop_sequence: u32,
    pub arrival: ServiceTime,
}
