//! Engine configuration.

use chrono::NaiveDate;

use super::locate::DistanceMetric;

/// Configuration parameters for building and querying a timetable.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Service date stop times are anchored to while loading.
    /// Results can be re-anchored to any query date with `ServiceTime::on`.
    pub reference_date: NaiveDate,

    /// Apply `calendar_dates.txt` additions and removals when resolving the
    /// service for a date. Off by default: only weekday flags are used.
    pub honor_calendar_dates: bool,

    /// Order query results by departure instead of trip table order.
    pub sort_by_departure: bool,

    /// How nearest-stop lookups measure distance.
    pub distance_metric: DistanceMetric,

    /// Substrings removed (first occurrence each) from station names for
    /// display.
    pub station_name_suffixes: Vec<String>,
}

impl EngineConfig {
    /// Create a configuration with default behaviour anchored to `reference_date`.
    pub fn anchored_at(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_date: NaiveDate::default(),
            honor_calendar_dates: false,
            sort_by_departure: false,
            distance_metric: DistanceMetric::SquaredEuclidean,
            station_name_suffixes: vec![" Caltrain".to_string(), " Station".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();

        assert!(!config.honor_calendar_dates);
        assert!(!config.sort_by_departure);
        assert_eq!(config.distance_metric, DistanceMetric::SquaredEuclidean);
        assert_eq!(config.station_name_suffixes, vec![" Caltrain", " Station"]);
    }

    #[test]
    fn anchored_keeps_defaults() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let config = EngineConfig::anchored_at(date);

        assert_eq!(config.reference_date, date);
        assert!(!config.honor_calendar_dates);
        assert_eq!(config.distance_metric, DistanceMetric::SquaredEuclidean);
    }
}
