//! Web layer for the schedule server.
//!
//! JSON endpoints for listing stations, resolving the service for a date,
//! querying trips and finding the nearest stop.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
