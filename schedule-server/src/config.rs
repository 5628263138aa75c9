//! Server configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `GTFS_DIR` | `data/caltrain` | unzipped GTFS feed directory |
//! | `BIND_ADDR` | `127.0.0.1:3000` | HTTP listen address |
//! | `HONOR_CALENDAR_DATES` | `false` | apply `calendar_dates.txt` exceptions |
//! | `SORT_BY_DEPARTURE` | `false` | order trips by departure time |
//! | `DISTANCE_METRIC` | `euclidean` | `euclidean` or `haversine` |
//! | `FIX_TIMEOUT_SECS` | `10` | how long to wait for a position fix |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use crate::geolocate::DEFAULT_FIX_TIMEOUT;
use crate::timetable::{DistanceMetric, EngineConfig};

const DEFAULT_GTFS_DIR: &str = "data/caltrain";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub gtfs_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub engine: EngineConfig,
    pub fix_timeout: Duration,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// Stop times are anchored to `today`.
    pub fn from_env(today: NaiveDate) -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok(), today)
    }

    /// Read configuration through `lookup`, which returns a variable's value if set.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        today: NaiveDate,
    ) -> Result<Self, ConfigError> {
        let get = |var: &'static str| lookup(var).filter(|v| !v.trim().is_empty());

        let gtfs_dir = get("GTFS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GTFS_DIR));

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| ConfigError::new("BIND_ADDR", &bind_addr))?;

        let honor_calendar_dates = match get("HONOR_CALENDAR_DATES") {
            Some(v) => parse_bool("HONOR_CALENDAR_DATES", &v)?,
            None => false,
        };
        let sort_by_departure = match get("SORT_BY_DEPARTURE") {
            Some(v) => parse_bool("SORT_BY_DEPARTURE", &v)?,
            None => false,
        };
        let distance_metric = match get("DISTANCE_METRIC") {
            Some(v) => v
                .parse::<DistanceMetric>()
                .map_err(|_| ConfigError::new("DISTANCE_METRIC", &v))?,
            None => DistanceMetric::default(),
        };
        let fix_timeout = match get("FIX_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::new("FIX_TIMEOUT_SECS", &v))?,
            None => DEFAULT_FIX_TIMEOUT,
        };

        Ok(Self {
            gtfs_dir,
            bind_addr,
            engine: EngineConfig {
                honor_calendar_dates,
                sort_by_departure,
                distance_metric,
                ..EngineConfig::anchored_at(today)
            },
            fix_timeout,
        })
    }
}

impl ConfigError {
    fn new(var: &'static str, value: &str) -> Self {
        Self {
            var,
            value: value.to_string(),
        }
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::new(var, value)),
    }
}
