//! Service calendars and their per-date exceptions.

use chrono::{Datelike, NaiveDate};

use super::ServiceId;

/// A row of `calendar.txt`: the weekdays a service runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCalendar {
    pub service_id: ServiceId,
    /// Indexed Sunday = 0 through Saturday = 6.
    pub days: [bool; 7],
}

impl ServiceCalendar {
    /// Returns true if the weekday flag for `date` is set.
    pub fn runs_on_weekday(&self, date: NaiveDate) -> bool {
        self.days[date.weekday().num_days_from_sunday() as usize]
    }
}

/// Whether a calendar-date exception adds or removes service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionKind {
    /// `exception_type = 1`
    Added,
    /// `exception_type = 2`
    Removed,
}

/// A row of `calendar_dates.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarException {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub kind: ExceptionKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekdays_only() -> ServiceCalendar {
        ServiceCalendar {
            service_id: ServiceId::new("weekday").unwrap(),
            days: [false, true, true, true, true, true, false],
        }
    }

    #[test]
    fn runs_on_weekdays() {
        let cal = weekdays_only();
        // 2024-03-15 is a Friday
        assert!(cal.runs_on_weekday(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
        // 2024-03-18 is a Monday
        assert!(cal.runs_on_weekday(NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()));
    }

    #[test]
    fn does_not_run_at_weekend() {
        let cal = weekdays_only();
        assert!(!cal.runs_on_weekday(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()));
        assert!(!cal.runs_on_weekday(NaiveDate::from_ymd_opt(2024, 3, 17).unwrap()));
    }
}
