//! Stops, stations and coordinates.

use super::StopId;

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A stop from `stops.txt`.
///
/// A stop without a parent is a station (or a standalone stop); a stop with
/// a `parent_station` is a platform belonging to that station.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub position: Coordinates,
    pub parent_station: Option<StopId>,
}

impl Stop {
    /// Returns true if this stop groups platforms rather than being one.
    pub fn is_station(&self) -> bool {
        self.parent_station.is_none()
    }

    /// Name with the first occurrence of each suffix removed.
    ///
    /// Feeds tend to repeat the operator in every name ("Palo Alto
    /// Caltrain Station"); pickers want just "Palo Alto".
    pub fn display_name(&self, suffixes: &[String]) -> String {
        suffixes.iter().fold(self.name.clone(), |name, suffix| {
            name.replacen(suffix.as_str(), "", 1)
        })
    }
}
