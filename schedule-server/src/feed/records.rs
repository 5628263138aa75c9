//! String-typed GTFS rows.
//!
//! Every field is kept as the raw string from the CSV; numeric and flag
//! fields are parsed once when the timetable is loaded. Columns the engine
//! does not use are ignored, and optional columns default to "".

use serde::Deserialize;

/// A row of `stops.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopRecord {
    pub stop_id: String,
    #[serde(default)]
    pub stop_name: String,
    #[serde(default)]
    pub stop_lat: String,
    #[serde(default)]
    pub stop_lon: String,
    #[serde(default)]
    pub location_type: String,
    #[serde(default)]
    pub parent_station: String,
}

/// A row of `routes.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteRecord {
    pub route_id: String,
    #[serde(default)]
    pub route_long_name: String,
}

/// A row of `trips.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripRecord {
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
    #[serde(default)]
    pub trip_short_name: String,
}

/// A row of `stop_times.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopTimeRecord {
    #[serde(default)]
    pub trip_id: String,
    #[serde(default)]
    pub arrival_time: String,
    #[serde(default)]
    pub departure_time: String,
    pub stop_id: String,
    pub stop_sequence: String,
}

/// A row of `calendar.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarRecord {
    pub service_id: String,
    #[serde(default)]
    pub monday: String,
    #[serde(default)]
    pub tuesday: String,
    #[serde(default)]
    pub wednesday: String,
    #[serde(default)]
    pub thursday: String,
    #[serde(default)]
    pub friday: String,
    #[serde(default)]
    pub saturday: String,
    #[serde(default)]
    pub sunday: String,
}

impl CalendarRecord {
    /// Weekday flags as (column name, value), Sunday first.
    pub fn flags(&self) -> [(&'static str, &str); 7] {
        [
            ("sunday", &self.sunday),
            ("monday", &self.monday),
            ("tuesday", &self.tuesday),
            ("wednesday", &self.wednesday),
            ("thursday", &self.thursday),
            ("friday", &self.friday),
            ("saturday", &self.saturday),
        ]
    }
}

/// A row of `calendar_dates.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarDateRecord {
    pub service_id: String,
    pub date: String,
    pub exception_type: String,
}

/// All tables of a GTFS feed, in source order.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub stops: Vec<StopRecord>,
    pub routes: Vec<RouteRecord>,
    pub trips: Vec<TripRecord>,
    pub stop_times: Vec<StopTimeRecord>,
    pub calendar: Vec<CalendarRecord>,
    pub calendar_dates: Vec<CalendarDateRecord>,
}
