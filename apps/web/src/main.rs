//! # Web
//!
//! Serves the client page and proxies `/api/proxy` to the counter API so the
//! browser only ever talks to its own origin.

use actix_web::{App, HttpServer, web};
use hitcount_infra::telemetry::{self, TelemetryConfig};
use tracing_actix_web::TracingLogger;

mod config;
mod error;
mod handlers;
mod state;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env("web"));

    let config = AppConfig::from_env();
    let state = AppState::new(&config).map_err(std::io::Error::other)?;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?;

    tracing::info!("Web frontend listening on {}:{}", config.host, config.port);

    server.run().await
}
