//! Service calendar resolution.
//!
//! Picks the one `service_id` that applies to a date. By default only the
//! weekday flags of `calendar.txt` are consulted; `calendar_dates.txt`
//! exceptions are applied only when the engine is configured to honor them.

use chrono::NaiveDate;
use tracing::trace;

use crate::domain::{
    CalendarException, ExceptionKind, NotFound, ScheduleError, ServiceCalendar, ServiceId,
};

/// Resolves a date to the service running on it.
#[derive(Debug, Default)]
pub struct ServiceResolver {
    calendars: Vec<ServiceCalendar>,
    exceptions: Vec<CalendarException>,
    honor_exceptions: bool,
}

impl ServiceResolver {
    pub fn new(
        calendars: Vec<ServiceCalendar>,
        exceptions: Vec<CalendarException>,
        honor_exceptions: bool,
    ) -> Self {
        Self {
            calendars,
            exceptions,
            honor_exceptions,
        }
    }

    /// Return the service running on `date`.
    ///
    /// The first calendar row (in table order) whose flag for the date's
    /// weekday is set wins. When exceptions are honored, a service added for
    /// that exact date takes precedence, and weekday rows whose service is
    /// removed for that date are skipped.
    pub fn resolve(&self, date: NaiveDate) -> Result<&ServiceId, ScheduleError> {
        if self.honor_exceptions {
            if let Some(added) = self
                .exceptions_on(date)
                .find(|e| e.kind == ExceptionKind::Added)
            {
                trace!(%date, service_id = %added.service_id, "service added by exception");
                return Ok(&added.service_id);
            }
        }

        self.calendars
            .iter()
            .filter(|c| c.runs_on_weekday(date))
            .find(|c| !(self.honor_exceptions && self.is_removed(&c.service_id, date)))
            .map(|c| &c.service_id)
            .ok_or_else(|| NotFound::ServiceForDate(date).into())
    }

    /// Get the exceptions in table order, whether or not they are honored.
    pub fn exceptions(&self) -> &[CalendarException] {
        &self.exceptions
    }

    fn exceptions_on(&self, date: NaiveDate) -> impl Iterator<Item = &CalendarException> {
        self.exceptions.iter().filter(move |e| e.date == date)
    }

    fn is_removed(&self, service_id: &ServiceId, date: NaiveDate) -> bool {
        self.exceptions_on(date)
            .any(|e| e.kind == ExceptionKind::Removed && &e.service_id == service_id)
    }
}
