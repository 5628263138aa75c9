//! Conversion of string-typed feed records into the domain model.
//!
//! Every numeric, flag and time field is parsed here, once. A record that
//! cannot be interpreted fails the whole load with the table, record key
//! and field named.

use chrono::NaiveDate;

use crate::domain::{
    CalendarException, Coordinates, ExceptionKind, Route, RouteId, ServiceCalendar, ServiceId,
    ServiceTime, Stop, StopId, StopTime, Trip, TripId,
};
use crate::feed::{
    CalendarDateRecord, CalendarRecord, LoadError, RouteRecord, StopRecord, StopTimeRecord,
    TripRecord,
};

/// Convert a stop. Generic nodes and boarding areas (`location_type` 3 and
/// 4) may omit coordinates and are not served; they yield `Ok(None)`.
pub(super) fn stop(record: &StopRecord) -> Result<Option<Stop>, LoadError> {
    let id = StopId::new(record.stop_id.as_str())
        .map_err(|_| LoadError::malformed("stops", "(blank)", "stop_id", ""))?;
    let key = record.stop_id.as_str();

    match record.location_type.as_str() {
        "" | "0" | "1" | "2" => {}
        "3" | "4" => return Ok(None),
        other => return Err(LoadError::malformed("stops", key, "location_type", other)),
    }

    let lat = parse_coordinate(&record.stop_lat, 90.0)
        .ok_or_else(|| LoadError::malformed("stops", key, "stop_lat", &record.stop_lat))?;
    let lon = parse_coordinate(&record.stop_lon, 180.0)
        .ok_or_else(|| LoadError::malformed("stops", key, "stop_lon", &record.stop_lon))?;

    Ok(Some(Stop {
        id,
        name: record.stop_name.clone(),
        position: Coordinates::new(lat, lon),
        parent_station: StopId::new(record.parent_station.as_str()).ok(),
    }))
}

pub(super) fn route(record: &RouteRecord) -> Result<Route, LoadError> {
    let id = RouteId::new(record.route_id.as_str())
        .map_err(|_| LoadError::malformed("routes", "(blank)", "route_id", ""))?;
    Ok(Route {
        id,
        long_name: record.route_long_name.clone(),
    })
}

pub(super) fn trip(record: &TripRecord) -> Result<Trip, LoadError> {
    let id = TripId::new(record.trip_id.as_str())
        .map_err(|_| LoadError::malformed("trips", "(blank)", "trip_id", ""))?;
    let key = record.trip_id.as_str();

    let route_id = RouteId::new(record.route_id.as_str())
        .map_err(|_| LoadError::malformed("trips", key, "route_id", ""))?;
    let service_id = ServiceId::new(record.service_id.as_str())
        .map_err(|_| LoadError::malformed("trips", key, "service_id", ""))?;

    Ok(Trip {
        id,
        route_id,
        service_id,
        short_name: record.trip_short_name.clone(),
    })
}

/// Normalize a stop time. Records without a trip id yield `Ok(None)`.
pub(super) fn stop_time(
    record: &StopTimeRecord,
    reference_date: NaiveDate,
) -> Result<Option<StopTime>, LoadError> {
    let Ok(trip_id) = TripId::new(record.trip_id.as_str()) else {
        return Ok(None);
    };
    let key = record.trip_id.as_str();

    let stop_sequence = record
        .stop_sequence
        .parse::<u32>()
        .map_err(|_| {
            LoadError::malformed("stop_times", key, "stop_sequence", &record.stop_sequence)
        })?;

    let stop_id = StopId::new(record.stop_id.as_str())
        .map_err(|_| LoadError::malformed("stop_times", key, "stop_id", ""))?;

    let raw_time = if record.arrival_time.is_empty() {
        &record.departure_time
    } else {
        &record.arrival_time
    };
    if raw_time.is_empty() {
        return Err(LoadError::malformed(
            "stop_times",
            format!("{key}#{stop_sequence}"),
            "arrival_time",
            "",
        ));
    }

    let arrival =
        ServiceTime::parse_gtfs(raw_time, reference_date).map_err(|source| LoadError::Time {
            trip_id: key.to_string(),
            stop_sequence,
            source,
        })?;

    Ok(Some(StopTime {
        trip_id,
        stop_id,
        stop_sequence,
        arrival,
    }))
}

pub(super) fn calendar(record: &CalendarRecord) -> Result<ServiceCalendar, LoadError> {
    let service_id = ServiceId::new(record.service_id.as_str())
        .map_err(|_| LoadError::malformed("calendar", "(blank)", "service_id", ""))?;

    let mut days = [false; 7];
    for (day, (field, value)) in days.iter_mut().zip(record.flags()) {
        *day = match value {
            "1" => true,
            "0" | "" => false,
            other => {
                return Err(LoadError::malformed(
                    "calendar",
                    record.service_id.as_str(),
                    field,
                    other,
                ));
            }
        };
    }

    Ok(ServiceCalendar { service_id, days })
}

pub(super) fn calendar_exception(
    record: &CalendarDateRecord,
) -> Result<CalendarException, LoadError> {
    let service_id = ServiceId::new(record.service_id.as_str())
        .map_err(|_| LoadError::malformed("calendar_dates", "(blank)", "service_id", ""))?;
    let key = record.service_id.as_str();

    let date = NaiveDate::parse_from_str(&record.date, "%Y%m%d")
        .map_err(|_| LoadError::malformed("calendar_dates", key, "date", &record.date))?;

    let kind = match record.exception_type.as_str() {
        "1" => ExceptionKind::Added,
        "2" => ExceptionKind::Removed,
        other => {
            return Err(LoadError::malformed(
                "calendar_dates",
                key,
                "exception_type",
                other,
            ));
        }
    };

    Ok(CalendarException {
        service_id,
        date,
        kind,
    })
}

/// Parse a finite coordinate no larger than `limit` in magnitude.
fn parse_coordinate(s: &str, limit: f64) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn stop_record(lat: &str, lon: &str, parent: &str) -> StopRecord {
        StopRecord {
            stop_id: "70011".to_string(),
            stop_name: "San Francisco Caltrain".to_string(),
            stop_lat: lat.to_string(),
            stop_lon: lon.to_string(),
            location_type: String::new(),
            parent_station: parent.to_string(),
        }
    }

    fn typed_stop_record(location_type: &str, lat: &str, lon: &str) -> StopRecord {
        StopRecord {
            location_type: location_type.to_string(),
            ..stop_record(lat, lon, "place_sf")
        }
    }

    fn stop_time_record(trip: &str, arr: &str, dep: &str, seq: &str) -> StopTimeRecord {
        StopTimeRecord {
            trip_id: trip.to_string(),
            arrival_time: arr.to_string(),
            departure_time: dep.to_string(),
            stop_id: "70011".to_string(),
            stop_sequence: seq.to_string(),
        }
    }

    fn calendar_record(flags: [&str; 7]) -> CalendarRecord {
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] =
            flags.map(String::from);
        CalendarRecord {
            service_id: "weekday".to_string(),
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
            sunday,
        }
    }

    #[test]
    fn stop_parses_coordinates_and_parent() {
        let s = stop(&stop_record("37.7765", "-122.3943", "place_sf"))
            .unwrap()
            .unwrap();
        assert_eq!(s.position, Coordinates::new(37.7765, -122.3943));
        assert_eq!(s.parent_station, Some(StopId::new("place_sf").unwrap()));

        let s = stop(&stop_record("37.7765", "-122.3943", ""))
            .unwrap()
            .unwrap();
        assert!(s.parent_station.is_none());
    }

    #[test]
    fn stop_rejects_bad_coordinates() {
        assert!(stop(&stop_record("north", "-122.0", "")).is_err());
        assert!(stop(&stop_record("", "-122.0", "")).is_err());
        assert!(stop(&stop_record("NaN", "-122.0", "")).is_err());
        assert!(stop(&stop_record("91.0", "-122.0", "")).is_err());
        assert!(stop(&stop_record("37.0", "-181.0", "")).is_err());
    }

    #[test]
    fn stop_error_names_field() {
        let err = stop(&stop_record("37.0", "west", "")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "stops record 70011: invalid stop_lon \"west\""
        );
    }

    #[test]
    fn generic_node_and_boarding_area_may_omit_coordinates() {
        for location_type in ["3", "4"] {
            let blank = typed_stop_record(location_type, "", "");
            assert_eq!(stop(&blank).unwrap(), None);
        }

        let placed = typed_stop_record("3", "37.0", "-122.0");
        assert_eq!(stop(&placed).unwrap(), None);
    }

    #[test]
    fn served_location_types_require_coordinates() {
        for location_type in ["", "0", "1", "2"] {
            let blank = typed_stop_record(location_type, "", "");
            assert!(stop(&blank).is_err());

            let placed = typed_stop_record(location_type, "37.0", "-122.0");
            assert!(stop(&placed).unwrap().is_some());
        }
    }

    #[test]
    fn stop_rejects_unknown_location_type() {
        let err = stop(&typed_stop_record("7", "37.0", "-122.0")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "stops record 70011: invalid location_type \"7\""
        );
    }

    #[test]
    fn stop_time_without_trip_is_discarded() {
        let r = stop_time_record("", "08:00:00", "08:00:00", "1");
        assert!(stop_time(&r, date()).unwrap().is_none());
    }

    #[test]
    fn stop_time_normalizes_arrival() {
        let r = stop_time_record("101", "25:05:00", "25:06:00", "7");
        let st = stop_time(&r, date()).unwrap().unwrap();

        assert_eq!(st.stop_sequence, 7);
        assert_eq!(st.arrival.day_offset(), 1);
        assert_eq!(st.arrival.to_string(), "25:05:00");
    }

    #[test]
    fn stop_time_falls_back_to_departure() {
        let r = stop_time_record("101", "", "08:01:00", "1");
        let st = stop_time(&r, date()).unwrap().unwrap();
        assert_eq!(st.arrival.to_string(), "08:01:00");
    }

    #[test]
    fn stop_time_without_any_time_fails() {
        let r = stop_time_record("101", "", "", "1");
        assert!(stop_time(&r, date()).is_err());
    }

    #[test]
    fn stop_time_rejects_negative_sequence() {
        let r = stop_time_record("101", "08:00:00", "08:00:00", "-1");
        let err = stop_time(&r, date()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MalformedField {
                field: "stop_sequence",
                ..
            }
        ));
    }

    #[test]
    fn stop_time_rejects_double_rollover() {
        let r = stop_time_record("101", "48:10:00", "48:10:00", "3");
        let err = stop_time(&r, date()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "stop_times record 101#3: malformed GTFS time: hour must be below 48"
        );
    }

    #[test]
    fn calendar_parses_flags_sunday_first() {
        let c = calendar(&calendar_record(["1", "1", "1", "1", "1", "0", ""])).unwrap();
        assert_eq!(c.days, [false, true, true, true, true, true, false]);
    }

    #[test]
    fn calendar_rejects_unknown_flag() {
        let err = calendar(&calendar_record(["1", "1", "yes", "1", "1", "0", "0"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "calendar record weekday: invalid wednesday \"yes\""
        );
    }

    #[test]
    fn calendar_exception_parses() {
        let e = calendar_exception(&CalendarDateRecord {
            service_id: "weekday".to_string(),
            date: "20240704".to_string(),
            exception_type: "2".to_string(),
        })
        .unwrap();

        assert_eq!(e.date, NaiveDate::from_ymd_opt(2024, 7, 4).unwrap());
        assert_eq!(e.kind, ExceptionKind::Removed);
    }

    #[test]
    fn calendar_exception_rejects_bad_values() {
        let bad_date = CalendarDateRecord {
            service_id: "weekday".to_string(),
            date: "2024-07-04".to_string(),
            exception_type: "1".to_string(),
        };
        assert!(calendar_exception(&bad_date).is_err());

        let bad_type = CalendarDateRecord {
            service_id: "weekday".to_string(),
            date: "20240704".to_string(),
            exception_type: "3".to_string(),
        };
        assert!(calendar_exception(&bad_type).is_err());
    }

    #[test]
    fn trip_requires_route_and_service() {
        let r = TripRecord {
            route_id: String::new(),
            service_id: "weekday".to_string(),
            trip_id: "101".to_string(),
            trip_short_name: "101".to_string(),
        };
        let err = trip(&r).unwrap_err();
        assert_eq!(err.to_string(), "trips record 101: invalid route_id \"\"");
    }
}
