//! Nearest-stop lookup.
//!
//! A linear scan over the stop table. The default metric compares squared
//! differences in raw degrees, which ranks correctly only over a small area
//! such as a single metro region; `Haversine` gives great-circle distances
//! behind the same interface.

use std::str::FromStr;

use geo::{Distance, Haversine, Point};

use crate::domain::{Coordinates, ScheduleError, Stop};

/// How to measure the distance between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Squared Euclidean distance in (lat, lon) degrees.
    #[default]
    SquaredEuclidean,
    /// Great-circle distance in metres.
    Haversine,
}

impl DistanceMetric {
    /// Distance between `a` and `b`. Only comparable with values of the same metric.
    pub fn distance(self, a: Coordinates, b: Coordinates) -> f64 {
        match self {
            DistanceMetric::SquaredEuclidean => (a.lat - b.lat).powi(2) + (a.lon - b.lon).powi(2),
            DistanceMetric::Haversine => haversine_distance(a, b),
        }
    }
}

/// Error returned when parsing an unknown metric name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown distance metric {0:?} (expected \"euclidean\" or \"haversine\")")]
pub struct UnknownMetric(String);

impl FromStr for DistanceMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "squared_euclidean" => Ok(DistanceMetric::SquaredEuclidean),
            "haversine" => Ok(DistanceMetric::Haversine),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

/// Great-circle distance in metres on a mean-radius sphere.
pub fn haversine_distance(a: Coordinates, b: Coordinates) -> f64 {
    Haversine.distance(Point::new(a.lon, a.lat), Point::new(b.lon, b.lat))
}

/// Find the stop closest to `target`.
///
/// Ties go to the stop that appears first in the table.
pub fn nearest(
    stops: &[Stop],
    target: Coordinates,
    metric: DistanceMetric,
) -> Result<&Stop, ScheduleError> {
    let mut best: Option<(&Stop, f64)> = None;

    for stop in stops {
        let d = metric.distance(stop.position, target);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((stop, d)),
        }
    }

    best.map(|(stop, _)| stop)
        .ok_or(ScheduleError::EmptyDataset)
}
