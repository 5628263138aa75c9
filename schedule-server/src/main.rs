use std::process::ExitCode;

use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use schedule_server::config::ServerConfig;
use schedule_server::feed;
use schedule_server::timetable::Timetable;
use schedule_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match ServerConfig::from_env(Local::now().date_naive()) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Nothing is served until the whole feed has loaded
    let timetable = match feed::read_dir(&config.gtfs_dir)
        .and_then(|feed| Timetable::load(&feed, config.engine.clone()))
    {
        Ok(timetable) => timetable,
        Err(e) => {
            error!(dir = %config.gtfs_dir.display(), "failed to load timetable: {e}");
            return ExitCode::FAILURE;
        }
    };

    let app = create_router(AppState::new(timetable, config.fix_timeout));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.bind_addr, "schedule server listening");
    info!("  GET /health");
    info!("  GET /api/stations");
    info!("  GET /api/service?date=YYYY-MM-DD");
    info!("  GET /api/trips?date=YYYY-MM-DD&from=STATION&to=STATION");
    info!("  GET /api/stops/nearest?lat=LAT&lon=LON[&station=true]");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
