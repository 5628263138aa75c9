//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{error, warn};

use crate::domain::{ScheduleError, StopId};
use crate::geolocate::{self, FixedPosition, LocateError, PositionError};
use crate::timetable::Timetable;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(stations))
        .route("/api/service", get(service))
        .route("/api/trips", get(trips))
        .route("/api/stops/nearest", get(nearest))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List stations for a station picker.
async fn stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state
        .timetable
        .stations()
        .map(StationResult::from)
        .collect();

    Json(StationsResponse { stations })
}

/// Resolve the service running on a date.
async fn service(
    State(state): State<AppState>,
    Query(req): Query<ServiceRequest>,
) -> Result<Json<ServiceResponse>, AppError> {
    let date = parse_date(req.date.as_deref(), Local::now().date_naive())?;
    let service_id = state.timetable.resolve_service_id(date)?;

    Ok(Json(ServiceResponse {
        date: date.to_string(),
        service_id: service_id.to_string(),
    }))
}

/// Trips between two stations on a date, with their status as of now.
async fn trips(
    State(state): State<AppState>,
    Query(req): Query<TripsRequest>,
) -> Result<Json<TripsResponse>, AppError> {
    let now = Local::now().naive_local();
    let date = parse_date(req.date.as_deref(), now.date())?;

    trips_between(&state.timetable, date, &req.from, &req.to, now).map(Json)
}

fn trips_between(
    timetable: &Timetable,
    date: NaiveDate,
    from: &str,
    to: &str,
    now: NaiveDateTime,
) -> Result<TripsResponse, AppError> {
    let from = parse_station(from)?;
    let to = parse_station(to)?;

    // The engine answers an empty list here; the API treats it as a user error
    if from == to {
        return Err(AppError::BadRequest {
            message: "origin and destination must be different stations".to_string(),
        });
    }

    let service_id = timetable.resolve_service_id(date)?;
    let trips = timetable
        .query_trips(service_id, &from, &to)?
        .iter()
        .map(|option| TripResult::from_option(option, option.status_at(date, now)))
        .collect();

    Ok(TripsResponse {
        date: date.to_string(),
        service_id: service_id.to_string(),
        trips,
    })
}

/// Stop (or station) nearest to a client-supplied position.
async fn nearest(
    State(state): State<AppState>,
    Query(req): Query<NearestRequest>,
) -> Result<Json<NearestResponse>, AppError> {
    let source = FixedPosition::from_parts(req.lat, req.lon);
    let position = geolocate::acquire(&source, state.fix_timeout)
        .await
        .map_err(LocateError::from)?;

    let timetable = &state.timetable;
    let id = if req.station {
        timetable.nearest_station(position.lat, position.lon)?
    } else {
        timetable.nearest_stop(position.lat, position.lon)?
    };

    let stop = timetable
        .stop(id.as_str())
        .ok_or_else(|| AppError::Internal {
            message: format!("stop {id} is referenced but not defined"),
        })?;

    Ok(Json(NearestResponse::from(stop)))
}

fn parse_date(date: Option<&str>, today: NaiveDate) -> Result<NaiveDate, AppError> {
    match date {
        None => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::BadRequest {
            message: format!("Invalid date: {s}"),
        }),
    }
}

fn parse_station(id: &str) -> Result<StopId, AppError> {
    StopId::new(id.trim()).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ScheduleError> for AppError {
    fn from(e: ScheduleError) -> Self {
        match e {
            ScheduleError::NotFound(_) | ScheduleError::EmptyDataset => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl From<LocateError> for AppError {
    fn from(e: LocateError) -> Self {
        match e {
            LocateError::Position(PositionError::Timeout) => AppError::Internal {
                message: e.to_string(),
            },
            LocateError::Position(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            LocateError::Schedule(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
