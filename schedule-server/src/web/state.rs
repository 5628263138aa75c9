//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::timetable::Timetable;

/// Shared application state.
///
/// The timetable is loaded before the server binds and never changes
/// afterwards, so handlers only ever read it.
#[derive(Clone)]
pub struct AppState {
    pub timetable: Arc<Timetable>,

    /// How long the nearest-stop endpoint waits for a position fix
    pub fix_timeout: Duration,
}

impl AppState {
    pub fn new(timetable: Timetable, fix_timeout: Duration) -> Self {
        Self {
            timetable: Arc::new(timetable),
            fix_timeout,
        }
    }
}
