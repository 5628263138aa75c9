//! Query error types.
//!
//! These errors are returned by queries against a loaded timetable. Loading
//! failures have their own type in the `feed` module.

use chrono::NaiveDate;

use super::{RouteId, StopId};

/// Something a query needed was absent from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFound {
    /// No calendar row is active on this date
    #[error("no service runs on {0}")]
    ServiceForDate(NaiveDate),

    /// A trip references a route that is not in the routes table
    #[error("route {0} not found")]
    Route(RouteId),

    /// A station id does not expand to any platform stops
    #[error("station {0} has no platforms")]
    Station(StopId),
}

/// Errors from schedule queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// Nearest-stop lookup on a dataset with no stops
    #[error("dataset contains no stops")]
    EmptyDataset,
}
