//! Feed loading error types.

use crate::domain::TimeError;

/// Errors while reading a feed or building a timetable from it.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The CSV file could not be opened or a row could not be decoded
    #[error("failed to read {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A field held a value the engine cannot interpret
    #[error("{table} record {key}: invalid {field} {value:?}")]
    MalformedField {
        table: &'static str,
        key: String,
        field: &'static str,
        value: String,
    },

    /// A stop time could not be normalized
    #[error("stop_times record {trip_id}#{stop_sequence}: {source}")]
    Time {
        trip_id: String,
        stop_sequence: u32,
        #[source]
        source: TimeError,
    },
}

impl LoadError {
    pub(crate) fn malformed(
        table: &'static str,
        key: impl Into<String>,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        LoadError::MalformedField {
            table,
            key: key.into(),
            field,
            value: value.into(),
        }
    }
}
