//! Compact duration rendering for trip listings.

use chrono::Duration;

/// Render a span as `"<H>h <M>m"`, dropping zero components.
///
/// Hours are whole hours of the span (not wrapped at 24), minutes the whole
/// minutes left over. Seconds are truncated. A span under one minute, or a
/// negative span, renders as an empty string.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::format_duration;
/// use chrono::Duration;
///
/// assert_eq!(format_duration(Duration::minutes(90)), "1h 30m");
/// assert_eq!(format_duration(Duration::minutes(60)), "1h");
/// assert_eq!(format_duration(Duration::minutes(45)), "45m");
/// assert_eq!(format_duration(Duration::zero()), "");
/// ```
pub fn format_duration(span: Duration) -> String {
    if span < Duration::zero() {
        return String::new();
    }

    let hours = span.num_hours();
    let minutes = span.num_minutes() % 60;

    match (hours, minutes) {
        (0, 0) => String::new(),
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_and_minutes() {
        assert_eq!(format_duration(Duration::minutes(90)), "1h 30m");
        assert_eq!(format_duration(Duration::minutes(125)), "2h 5m");
    }

    #[test]
    fn whole_hours() {
        assert_eq!(format_duration(Duration::minutes(60)), "1h");
        assert_eq!(format_duration(Duration::hours(3)), "3h");
    }

    #[test]
    fn minutes_only() {
        assert_eq!(format_duration(Duration::minutes(45)), "45m");
        assert_eq!(format_duration(Duration::minutes(1)), "1m");
    }

    #[test]
    fn under_a_minute_is_empty() {
        assert_eq!(format_duration(Duration::zero()), "");
        assert_eq!(format_duration(Duration::seconds(59)), "");
    }

    #[test]
    fn seconds_are_truncated() {
        assert_eq!(format_duration(Duration::seconds(15 * 60 + 59)), "15m");
        assert_eq!(format_duration(Duration::seconds(3600 + 30)), "1h");
    }

    #[test]
    fn hours_do_not_wrap_at_a_day() {
        assert_eq!(format_duration(Duration::hours(25)), "25h");
    }

    #[test]
    fn negative_is_empty() {
        assert_eq!(format_duration(Duration::minutes(-5)), "");
    }
}
