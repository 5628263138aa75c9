//! Domain types for the schedule query engine.
//!
//! This module contains the validated model a timetable is built from.
//! Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod calendar;
mod duration;
mod error;
mod ids;
mod stop;
mod time;
mod trip;

pub use calendar::{CalendarException, ExceptionKind, ServiceCalendar};
pub use duration::format_duration;
pub use error::{NotFound, ScheduleError};
pub use ids::{InvalidId, RouteId, ServiceId, StopId, TripId};
pub use stop::{Coordinates, Stop};
pub use time::{MAX_SERVICE_HOURS, ServiceTime, TimeError};
pub use trip::{Route, StopTime, Trip};
