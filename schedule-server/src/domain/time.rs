//! GTFS service time handling.
//!
//! GTFS writes stop times as "HH:MM:SS" measured from the start of the
//! service day. Hours may run past 23 for trips that continue after
//! midnight, so "25:10:00" means 01:10 on the following calendar day. This
//! module anchors those values to a service date so that ordinary ordering
//! and subtraction work across midnight.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

/// GTFS hours at or above this value would need more than one day of
/// rollover, which is not supported.
pub const MAX_SERVICE_HOURS: u32 = 48;

/// Error returned when parsing a malformed or unsupported GTFS time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed GTFS time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// Returns the reason the time was rejected.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// A stop time anchored to a service date.
///
/// Keeps the service date the time was read against, the number of days it
/// rolled over (0 or 1), and the resulting absolute instant. Two values read
/// against the same service date compare in schedule order.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::ServiceTime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let late = ServiceTime::parse_gtfs("23:50:00", date).unwrap();
/// let after_midnight = ServiceTime::parse_gtfs("24:10:00", date).unwrap();
///
/// assert!(late < after_midnight);
/// assert_eq!(after_midnight.day_offset(), 1);
/// assert_eq!(after_midnight.to_string(), "24:10:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceTime {
    service_date: NaiveDate,
    day_offset: u8,
    at: NaiveDateTime,
}

impl ServiceTime {
    /// Create a time on the service date itself (no rollover).
    pub fn new(service_date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            service_date,
            day_offset: 0,
            at: service_date.and_time(time),
        }
    }

    /// Parse a GTFS time (`H:MM:SS` or `HH:MM:SS`) against a service date.
    ///
    /// Hours from 24 to 47 roll over to the next calendar day. Anything from
    /// 48 upwards is rejected rather than wrapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::domain::ServiceTime;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    ///
    /// assert!(ServiceTime::parse_gtfs("8:05:00", date).is_ok());
    /// assert!(ServiceTime::parse_gtfs("08:05:00", date).is_ok());
    /// assert!(ServiceTime::parse_gtfs("47:59:59", date).is_ok());
    ///
    /// assert!(ServiceTime::parse_gtfs("48:00:00", date).is_err());
    /// assert!(ServiceTime::parse_gtfs("08:05", date).is_err());
    /// assert!(ServiceTime::parse_gtfs("08:60:00", date).is_err());
    /// ```
    pub fn parse_gtfs(s: &str, service_date: NaiveDate) -> Result<Self, TimeError> {
        let mut parts = s.trim().split(':');
        let (h, m, sec) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(m), Some(sec), None) => (h, m, sec),
            _ => return Err(TimeError::new("expected H:MM:SS or HH:MM:SS")),
        };

        let hours = parse_digits(h, 1, 2).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hours >= MAX_SERVICE_HOURS {
            return Err(TimeError::new("hour must be below 48"));
        }

        let minute =
            parse_digits(m, 2, 2).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second =
            parse_digits(sec, 2, 2).ok_or_else(|| TimeError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        let day_offset = (hours / 24) as u8;
        let time = NaiveTime::from_hms_opt(hours % 24, minute, second)
            .ok_or_else(|| TimeError::new("invalid time"))?;
        let at = service_date
            .and_time(time)
            .checked_add_signed(Duration::days(i64::from(day_offset)))
            .ok_or_else(|| TimeError::new("date overflow"))?;

        Ok(Self {
            service_date,
            day_offset,
            at,
        })
    }

    /// Returns the service date this time was anchored to.
    pub fn service_date(&self) -> NaiveDate {
        self.service_date
    }

    /// Returns how many days past the service date this time falls (0 or 1).
    pub fn day_offset(&self) -> u8 {
        self.day_offset
    }

    /// Returns the wall-clock time of day.
    pub fn time(&self) -> NaiveTime {
        self.at.time()
    }

    /// Returns the hours as GTFS writes them (24 and above after midnight).
    pub fn gtfs_hours(&self) -> u32 {
        self.at.hour() + 24 * u32::from(self.day_offset)
    }

    /// Returns the absolute instant.
    pub fn to_datetime(&self) -> NaiveDateTime {
        self.at
    }

    /// Re-anchor this time to another service date.
    ///
    /// Returns `None` only if the result falls outside chrono's range.
    pub fn on(&self, service_date: NaiveDate) -> Option<NaiveDateTime> {
        service_date
            .and_time(self.time())
            .checked_add_signed(Duration::days(i64::from(self.day_offset)))
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.at.signed_duration_since(other.at)
    }
}

impl Ord for ServiceTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at
            .cmp(&other.at)
            .then(self.day_offset.cmp(&other.day_offset))
    }
}

impl PartialOrd for ServiceTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ServiceTime({} +{} {})",
            self.service_date,
            self.day_offset,
            self.at.time()
        )
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.gtfs_hours(),
            self.at.minute(),
            self.at.second()
        )
    }
}

/// Parse between `min_len` and `max_len` ASCII digits into a u32.
fn parse_digits(s: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if s.len() < min_len || s.len() > max_len {
        return None;
    }
    s.chars()
        .try_fold(0u32, |acc, c| Some(acc * 10 + c.to_digit(10)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let d = date(2024, 3, 15);

        let t = ServiceTime::parse_gtfs("00:00:00", d).unwrap();
        assert_eq!(t.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(t.day_offset(), 0);

        let t = ServiceTime::parse_gtfs("23:59:59", d).unwrap();
        assert_eq!(t.time(), NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(t.day_offset(), 0);

        let t = ServiceTime::parse_gtfs("7:04:09", d).unwrap();
        assert_eq!(t.time(), NaiveTime::from_hms_opt(7, 4, 9).unwrap());
    }

    #[test]
    fn parse_trims_whitespace() {
        let d = date(2024, 3, 15);
        let t = ServiceTime::parse_gtfs(" 08:15:00 ", d).unwrap();
        assert_eq!(t.to_string(), "08:15:00");
    }

    #[test]
    fn parse_after_midnight_rolls_over() {
        let d = date(2024, 3, 15);
        let t = ServiceTime::parse_gtfs("25:10:00", d).unwrap();

        assert_eq!(t.day_offset(), 1);
        assert_eq!(t.service_date(), d);
        assert_eq!(t.time(), NaiveTime::from_hms_opt(1, 10, 0).unwrap());
        assert_eq!(t.to_datetime().date(), date(2024, 3, 16));
        assert_eq!(t.gtfs_hours(), 25);
    }

    #[test]
    fn parse_invalid_format() {
        let d = date(2024, 3, 15);
        assert!(ServiceTime::parse_gtfs("", d).is_err());
        assert!(ServiceTime::parse_gtfs("08:15", d).is_err());
        assert!(ServiceTime::parse_gtfs("08:15:00:00", d).is_err());
        assert!(ServiceTime::parse_gtfs("081500", d).is_err());
        assert!(ServiceTime::parse_gtfs("8:5:00", d).is_err());
        assert!(ServiceTime::parse_gtfs("008:15:00", d).is_err());
        assert!(ServiceTime::parse_gtfs("ab:15:00", d).is_err());
        assert!(ServiceTime::parse_gtfs("-1:15:00", d).is_err());
    }

    #[test]
    fn parse_invalid_values() {
        let d = date(2024, 3, 15);
        assert!(ServiceTime::parse_gtfs("08:60:00", d).is_err());
        assert!(ServiceTime::parse_gtfs("08:00:60", d).is_err());
    }

    #[test]
    fn reject_more_than_one_rollover() {
        let d = date(2024, 3, 15);
        let err = ServiceTime::parse_gtfs("48:00:00", d).unwrap_err();
        assert_eq!(err.reason(), "hour must be below 48");
        assert!(ServiceTime::parse_gtfs("72:30:00", d).is_err());
        assert!(ServiceTime::parse_gtfs("47:59:59", d).is_ok());
    }

    #[test]
    fn error_display() {
        let d = date(2024, 3, 15);
        let err = ServiceTime::parse_gtfs("08:60:00", d).unwrap_err();
        assert_eq!(err.to_string(), "malformed GTFS time: minute must be 0-59");
    }

    #[test]
    fn display_format() {
        let d = date(2024, 3, 15);
        assert_eq!(
            ServiceTime::parse_gtfs("7:04:09", d).unwrap().to_string(),
            "07:04:09"
        );
        assert_eq!(
            ServiceTime::parse_gtfs("24:00:00", d).unwrap().to_string(),
            "24:00:00"
        );
    }

    #[test]
    fn debug_format() {
        let d = date(2024, 3, 15);
        let t = ServiceTime::parse_gtfs("25:10:00", d).unwrap();
        assert_eq!(format!("{:?}", t), "ServiceTime(2024-03-15 +1 01:10:00)");
    }

    #[test]
    fn ordering_across_midnight() {
        let d = date(2024, 3, 15);
        let before = ServiceTime::parse_gtfs("23:59:00", d).unwrap();
        let after = ServiceTime::parse_gtfs("24:01:00", d).unwrap();
        let early = ServiceTime::parse_gtfs("00:01:00", d).unwrap();

        assert!(before < after);
        assert!(early < before);
        assert!(early < after);
    }

    #[test]
    fn duration_between() {
        let d = date(2024, 3, 15);
        let from = ServiceTime::parse_gtfs("23:45:00", d).unwrap();
        let to = ServiceTime::parse_gtfs("24:20:00", d).unwrap();

        assert_eq!(to.signed_duration_since(from), Duration::minutes(35));
        assert_eq!(from.signed_duration_since(to), Duration::minutes(-35));
    }

    #[test]
    fn new_has_no_offset() {
        let d = date(2024, 3, 15);
        let t = ServiceTime::new(d, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(t.day_offset(), 0);
        assert_eq!(t, ServiceTime::parse_gtfs("09:30:00", d).unwrap());
    }

    #[test]
    fn reanchor_to_other_date() {
        let reference = date(2024, 3, 15);
        let t = ServiceTime::parse_gtfs("24:30:00", reference).unwrap();

        let anchored = t.on(date(2024, 6, 1)).unwrap();
        assert_eq!(anchored.date(), date(2024, 6, 2));
        assert_eq!(anchored.time(), NaiveTime::from_hms_opt(0, 30, 0).unwrap());
    }

    #[test]
    fn equality_and_hash() {
        use std::collections::HashSet;
        let d = date(2024, 3, 15);
        let a = ServiceTime::parse_gtfs("08:00:00", d).unwrap();
        let b = ServiceTime::parse_gtfs("8:00:00", d).unwrap();

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn same_instant_different_anchor_is_not_equal() {
        let a = ServiceTime::parse_gtfs("24:00:00", date(2024, 3, 15)).unwrap();
        let b = ServiceTime::parse_gtfs("00:00:00", date(2024, 3, 16)).unwrap();

        assert_eq!(a.to_datetime(), b.to_datetime());
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }
}
