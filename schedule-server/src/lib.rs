//! GTFS schedule server.
//!
//! Loads a static GTFS feed once at startup and answers: "which trains run
//! between these two stations today, and when?"

pub mod config;
pub mod domain;
pub mod feed;
pub mod geolocate;
pub mod timetable;
pub mod web;
