//! Schedule query engine.
//!
//! A `Timetable` is built once from a GTFS feed by [`Timetable::load`],
//! which parses, normalizes and indexes every table. The result is
//! immutable; queries borrow it and never allocate shared state, so a
//! single instance can serve any number of concurrent readers.
//!
//! The three queries it answers are:
//!
//! - which service runs on a date ([`Timetable::resolve_service_id`]),
//! - which trips of that service run between two stations
//!   ([`Timetable::query_trips`]),
//! - which stop is closest to a position ([`Timetable::nearest_stop`]).

mod calendar;
mod config;
mod index;
mod load;
mod locate;
mod query;

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::{Coordinates, Route, RouteId, ScheduleError, ServiceId, Stop, StopId, Trip};
use crate::feed::{Feed, LoadError};

pub use calendar::ServiceResolver;
pub use config::EngineConfig;
pub use index::StopTimeIndex;
pub use locate::{DistanceMetric, UnknownMetric, haversine_distance};
pub use query::{TripOption, TripStatus};

/// A fully loaded, immutable GTFS timetable.
#[derive(Debug)]
pub struct Timetable {
    config: EngineConfig,
    stops: Vec<Stop>,
    /// Station id -> ids of its platform stops, in stop table order.
    platforms: HashMap<StopId, Vec<StopId>>,
    routes: HashMap<RouteId, Route>,
    trips: Vec<Trip>,
    stop_times: StopTimeIndex,
    services: ServiceResolver,
}

/// A station-level stop as offered to a station picker.
#[derive(Debug, Clone, PartialEq)]
pub struct StationEntry<'a> {
    pub stop: &'a Stop,
    pub display_name: String,
}

impl Timetable {
    /// Parse, normalize and index a feed.
    ///
    /// Either every table loads or the whole load fails; there is no
    /// partially loaded timetable.
    pub fn load(feed: &Feed, config: EngineConfig) -> Result<Self, LoadError> {
        let mut stops = Vec::with_capacity(feed.stops.len());
        let mut unserved = 0usize;
        for record in &feed.stops {
            match load::stop(record)? {
                Some(stop) => stops.push(stop),
                None => unserved += 1,
            }
        }
        if unserved > 0 {
            debug!(unserved, "skipped generic nodes and boarding areas");
        }

        // A platform whose parent is missing is served as a station of its own
        let known: HashSet<StopId> = stops.iter().map(|s| s.id.clone()).collect();
        for stop in &mut stops {
            let dangling = stop
                .parent_station
                .as_ref()
                .is_some_and(|parent| !known.contains(parent));
            if dangling {
                warn!(stop_id = %stop.id, "parent station not in stops table");
                stop.parent_station = None;
            }
        }

        let mut platforms: HashMap<StopId, Vec<StopId>> = HashMap::new();
        for stop in &stops {
            if let Some(parent) = &stop.parent_station {
                platforms
                    .entry(parent.clone())
                    .or_default()
                    .push(stop.id.clone());
            }
        }

        let mut routes = HashMap::new();
        for record in &feed.routes {
            let route = load::route(record)?;
            if routes.contains_key(&route.id) {
                warn!(route_id = %route.id, "duplicate route, keeping first");
                continue;
            }
            routes.insert(route.id.clone(), route);
        }

        let trips = feed
            .trips
            .iter()
            .map(load::trip)
            .collect::<Result<Vec<_>, _>>()?;

        let mut stop_times = Vec::with_capacity(feed.stop_times.len());
        let mut discarded = 0usize;
        for record in &feed.stop_times {
            match load::stop_time(record, config.reference_date)? {
                Some(st) => stop_times.push(st),
                None => discarded += 1,
            }
        }
        if discarded > 0 {
            debug!(discarded, "discarded stop times without trip id");
        }
        let stop_times = StopTimeIndex::build(stop_times);

        let calendars = feed
            .calendar
            .iter()
            .map(load::calendar)
            .collect::<Result<Vec<_>, _>>()?;
        let exceptions = feed
            .calendar_dates
            .iter()
            .map(load::calendar_exception)
            .collect::<Result<Vec<_>, _>>()?;
        let services = ServiceResolver::new(calendars, exceptions, config.honor_calendar_dates);

        info!(
            stops = stops.len(),
            stations = platforms.len(),
            routes = routes.len(),
            trips = trips.len(),
            stop_times = stop_times.len(),
            "timetable loaded"
        );

        Ok(Self {
            config,
            stops,
            platforms,
            routes,
            trips,
            stop_times,
            services,
        })
    }

    /// Return the service running on `date`.
    ///
    /// Fails with `NotFound` when no calendar row applies; callers must not
    /// go on to query trips in that case.
    pub fn resolve_service_id(&self, date: NaiveDate) -> Result<&ServiceId, ScheduleError> {
        self.services.resolve(date)
    }

    /// Return the id of the stop closest to (`lat`, `lon`).
    ///
    /// Platforms and stations are both candidates. Fails with `EmptyDataset`
    /// if the feed had no stops.
    pub fn nearest_stop(&self, lat: f64, lon: f64) -> Result<&StopId, ScheduleError> {
        locate::nearest(
            &self.stops,
            Coordinates::new(lat, lon),
            self.config.distance_metric,
        )
        .map(|stop| &stop.id)
    }

    /// Like [`nearest_stop`](Self::nearest_stop), but a platform resolves
    /// to its parent station so the result can be used as a query origin.
    /// The returned id always names a stop in the timetable.
    pub fn nearest_station(&self, lat: f64, lon: f64) -> Result<&StopId, ScheduleError> {
        let stop = locate::nearest(
            &self.stops,
            Coordinates::new(lat, lon),
            self.config.distance_metric,
        )?;
        Ok(stop.parent_station.as_ref().unwrap_or(&stop.id))
    }

    /// Station-level stops in table order, with display names.
    pub fn stations(&self) -> impl Iterator<Item = StationEntry<'_>> {
        self.stops
            .iter()
            .filter(|s| s.is_station())
            .map(|stop| StationEntry {
                stop,
                display_name: stop.display_name(&self.config.station_name_suffixes),
            })
    }

    /// Look up a stop by id.
    pub fn stop(&self, id: &str) -> Option<&Stop> {
        self.stops.iter().find(|s| s.id.as_str() == id)
    }

    /// Get the platform stop ids of a station.
    pub fn platforms_of(&self, station: &str) -> &[StopId] {
        self.platforms
            .get(station)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get the configuration the timetable was loaded with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the stop-time index.
    pub fn stop_times(&self) -> &StopTimeIndex {
        &self.stop_times
    }

    /// Get the trips in table order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }
}
