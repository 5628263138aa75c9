//! Trip queries between two stations.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use crate::domain::{
    NotFound, ScheduleError, ServiceId, ServiceTime, StopId, TripId, format_duration,
};

use super::Timetable;

/// A trip that serves both stations in the requested direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripOption {
    pub trip_id: TripId,
    /// When the trip is at the origin station.
    pub start: ServiceTime,
    /// When the trip is at the destination station.
    pub end: ServiceTime,
    /// Elapsed time between the two, e.g. "1h 5m".
    pub duration: String,
    /// Route and trip name, e.g. "Local #101".
    pub name: String,
}

/// Where a trip is relative to a moment on its service date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripStatus {
    /// Has not reached the origin yet.
    Upcoming,
    /// Left the origin, not yet at the destination.
    EnRoute,
    /// Already reached the destination.
    Completed,
}

impl TripOption {
    /// Time between origin and destination.
    pub fn elapsed(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    /// Classify the trip relative to `now`, running on `service_date`.
    ///
    /// Times are re-anchored to `service_date` first, so a trip listed as
    /// "24:30:00" is compared against 00:30 on the following day.
    pub fn status_at(&self, service_date: NaiveDate, now: NaiveDateTime) -> TripStatus {
        let (Some(start), Some(end)) = (self.start.on(service_date), self.end.on(service_date))
        else {
            return TripStatus::Upcoming;
        };

        if end < now {
            TripStatus::Completed
        } else if start < now {
            TripStatus::EnRoute
        } else {
            TripStatus::Upcoming
        }
    }
}

impl Timetable {
    /// Find the trips of `service_id` that call at `from_station` and later
    /// at `to_station`.
    ///
    /// Both ids are station-level; each expands to the platforms whose
    /// `parent_station` it is. A station with no platforms (including a
    /// platform id passed directly) fails with `NotFound`. Results follow
    /// trip table order unless the engine sorts by departure.
    ///
    /// Asking for the same station at both ends returns no trips.
    pub fn query_trips(
        &self,
        service_id: &ServiceId,
        from_station: &StopId,
        to_station: &StopId,
    ) -> Result<Vec<TripOption>, ScheduleError> {
        if from_station == to_station {
            debug!(station = %from_station, "origin equals destination");
            return Ok(Vec::new());
        }

        let from = self.expand_station(from_station)?;
        let to = self.expand_station(to_station)?;

        let mut options = Vec::new();

        for trip in self.trips.iter().filter(|t| &t.service_id == service_id) {
            let stop_times = self.stop_times.stop_times(&trip.id);

            let board = stop_times.iter().find(|st| from.contains(&st.stop_id));
            let alight = stop_times.iter().find(|st| to.contains(&st.stop_id));

            let (Some(board), Some(alight)) = (board, alight) else {
                continue;
            };

            if board.arrival >= alight.arrival {
                trace!(trip_id = %trip.id, "wrong direction");
                continue;
            }

            let route = self
                .routes
                .get(&trip.route_id)
                .ok_or_else(|| NotFound::Route(trip.route_id.clone()))?;

            options.push(TripOption {
                trip_id: trip.id.clone(),
                start: board.arrival,
                end: alight.arrival,
                duration: format_duration(alight.arrival.signed_duration_since(board.arrival)),
                name: trip.display_name(route),
            });
        }

        if self.config.sort_by_departure {
            options.sort_by_key(|o| o.start);
        }

        debug!(
            %service_id,
            from = %from_station,
            to = %to_station,
            trips = options.len(),
            "queried trips"
        );
        Ok(options)
    }

    fn expand_station(&self, station: &StopId) -> Result<&[StopId], ScheduleError> {
        let platforms = self.platforms_of(station.as_str());
        if platforms.is_empty() {
            return Err(NotFound::Station(station.clone()).into());
        }
        Ok(platforms)
    }
}
