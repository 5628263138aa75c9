//! Position acquisition for picking an origin station.
//!
//! Getting a position fix is asynchronous and can fail (no fix, permission
//! denied, too slow). Once coordinates are in hand, the nearest-stop lookup
//! itself is synchronous. `locate_origin` joins the two.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::domain::{Coordinates, ScheduleError, StopId};
use crate::timetable::Timetable;

/// How long to wait for a fix by default.
pub const DEFAULT_FIX_TIMEOUT: Duration = Duration::from_secs(10);

/// Why no position is available.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("no position fix available")]
    NoFix,

    #[error("permission to read position was denied")]
    PermissionDenied,

    #[error("timed out waiting for a position fix")]
    Timeout,
}

/// Errors from locating an origin station.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    #[error(transparent)]
    Position(#[from] PositionError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Something that can report where the user is.
///
/// This abstraction allows callers to plug in a device API, a client-supplied
/// fix, or a mock.
pub trait PositionSource {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, PositionError>> + Send;
}

/// A source that already knows the answer, or knows there is none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(Option<Coordinates>);

impl FixedPosition {
    pub fn new(position: Coordinates) -> Self {
        Self(Some(position))
    }

    /// A source that never has a fix.
    pub fn unavailable() -> Self {
        Self(None)
    }

    /// Build from optional latitude and longitude; both are needed for a fix.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Self {
        match (lat, lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Self::new(Coordinates::new(lat, lon))
            }
            _ => Self::unavailable(),
        }
    }
}

impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        self.0.ok_or(PositionError::NoFix)
    }
}

/// Wait up to `timeout` for a position from `source`.
pub async fn acquire<P: PositionSource>(
    source: &P,
    timeout: Duration,
) -> Result<Coordinates, PositionError> {
    tokio::time::timeout(timeout, source.current_position())
        .await
        .map_err(|_| PositionError::Timeout)?
}

/// Acquire a position and return the nearest station to it.
pub async fn locate_origin<P: PositionSource>(
    source: &P,
    timetable: &Timetable,
    timeout: Duration,
) -> Result<StopId, LocateError> {
    let position = acquire(source, timeout).await?;
    let station = timetable.nearest_station(position.lat, position.lon)?;

    debug!(lat = position.lat, lon = position.lon, %station, "located origin");
    Ok(station.clone())
}
