//! Stop-time index keyed by trip.
//!
//! The query engine looks up each candidate trip's stop times once per
//! query, so they are grouped by trip id up front. Each group is sorted by
//! `stop_sequence` when the index is built; feeds are not required to list
//! stop times in sequence order.

use std::collections::HashMap;

use crate::domain::{StopTime, TripId};

/// Stop times grouped by trip, each group in `stop_sequence` order.
#[derive(Debug, Default)]
pub struct StopTimeIndex {
    by_trip: HashMap<TripId, Vec<StopTime>>,
}

impl StopTimeIndex {
    /// Group stop times by trip and order each group by `stop_sequence`.
    ///
    /// The sort is stable, so records sharing a sequence number keep their
    /// source order.
    pub fn build(stop_times: impl IntoIterator<Item = StopTime>) -> Self {
        let mut by_trip: HashMap<TripId, Vec<StopTime>> = HashMap::new();

        for stop_time in stop_times {
            by_trip
                .entry(stop_time.trip_id.clone())
                .or_default()
                .push(stop_time);
        }

        for group in by_trip.values_mut() {
            group.sort_by_key(|st| st.stop_sequence);
        }

        Self { by_trip }
    }

    /// Get the stop times of a trip, in sequence order.
    ///
    /// Unknown trips have no stop times.
    pub fn stop_times(&self, trip: &TripId) -> &[StopTime] {
        self.by_trip.get(trip).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Get the number of trips with at least one stop time.
    pub fn trip_count(&self) -> usize {
        self.by_trip.len()
    }

    /// Get the total number of indexed stop times.
    pub fn len(&self) -> usize {
        self.by_trip.values().map(|v| v.len()).sum()
    }

    /// Check if the index holds no stop times.
    pub fn is_empty(&self) -> bool {
        self.by_trip.is_empty()
    }
}
