//! # Counter API
//!
//! Rate limited counter service backed by Redis.

use actix_web::{App, HttpServer, web};
use hitcount_infra::telemetry::{self, TelemetryConfig};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env("counter-api"));

    let config = AppConfig::from_env();

    // A store we cannot reach at startup is fatal: exit before binding so
    // the orchestrator restarts us.
    let state = match AppState::new(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to counter store");
            return Err(std::io::Error::other(e));
        }
    };

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| handlers::configure_routes(cfg, &state))
    })
    .bind((config.host.as_str(), config.port))?;

    tracing::info!("Counter API listening on {}:{}", config.host, config.port);

    server.run().await
}
