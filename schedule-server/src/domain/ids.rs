//! GTFS identifier types.
//!
//! GTFS ids are opaque, feed-scoped strings. The only validation is that
//! they are non-empty; keeping them as distinct types stops a stop id being
//! passed where a trip id is expected.

use std::borrow::Borrow;
use std::fmt;

/// Error returned when constructing an identifier from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: cannot be empty")]
pub struct InvalidId {
    kind: &'static str,
}

macro_rules! gtfs_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Create an id, rejecting the empty string.
            pub fn new(s: impl Into<String>) -> Result<Self, InvalidId> {
                let s = s.into();
                if s.is_empty() {
                    return Err(InvalidId { kind: $kind });
                }
                Ok(Self(s))
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the id and returns the inner String.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

gtfs_id!(
    /// Identifies a stop, platform or station (`stops.stop_id`).
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::domain::StopId;
    ///
    /// let id = StopId::new("70011").unwrap();
    /// assert_eq!(id.as_str(), "70011");
    /// assert!(StopId::new("").is_err());
    /// ```
    StopId,
    "stop"
);

gtfs_id!(
    /// Identifies a trip (`trips.trip_id`).
    TripId,
    "trip"
);

gtfs_id!(
    /// Identifies a route (`routes.route_id`).
    RouteId,
    "route"
);

gtfs_id!(
    /// Identifies a service calendar (`calendar.service_id`).
    ServiceId,
    "service"
);
