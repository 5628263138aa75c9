//! Reading GTFS tables from a feed directory.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::error::LoadError;
use super::records::Feed;

/// Read the tables the engine uses from an unzipped GTFS directory.
///
/// `calendar_dates.txt` is optional and reads as empty when absent; every
/// other table is required.
pub fn read_dir(dir: &Path) -> Result<Feed, LoadError> {
    info!(path = %dir.display(), "reading GTFS feed");

    let feed = Feed {
        stops: read_table(dir, "stops.txt")?,
        routes: read_table(dir, "routes.txt")?,
        trips: read_table(dir, "trips.txt")?,
        stop_times: read_table(dir, "stop_times.txt")?,
        calendar: read_table(dir, "calendar.txt")?,
        calendar_dates: read_optional_table(dir, "calendar_dates.txt")?,
    };

    info!(
        stops = feed.stops.len(),
        trips = feed.trips.len(),
        stop_times = feed.stop_times.len(),
        "read GTFS feed"
    );
    Ok(feed)
}

fn read_table<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>, LoadError> {
    let read_err = |source| LoadError::Read {
        file: file.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(dir.join(file))
        .map_err(read_err)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(read_err)?;

    debug!(file, rows = rows.len(), "read table");
    Ok(rows)
}

fn read_optional_table<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>, LoadError> {
    if !dir.join(file).is_file() {
        debug!(file, "optional table absent");
        return Ok(Vec::new());
    }
    read_table(dir, file)
}
