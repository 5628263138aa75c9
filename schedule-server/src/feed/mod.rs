//! GTFS feed loading.
//!
//! Reads the CSV tables of an unzipped GTFS feed into string-typed records.
//! Interpreting those strings is left to `Timetable::load`.

mod error;
mod reader;
mod records;

pub use error::LoadError;
pub use reader::read_dir;
pub use records::{
    CalendarDateRecord, CalendarRecord, Feed, RouteRecord, StopRecord, StopTimeRecord, TripRecord,
};
