//! HTTP handlers and route configuration.

mod counter;
mod health;

use actix_web::web;

use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Configure all application routes.
///
/// Only `/api` is rate limited; `/health` must answer even when a client is
/// over quota.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/api")
                .wrap(RateLimitMiddleware::new(
                    state.limiter.clone(),
                    state.client_identity,
                ))
                .route(web::get().to(counter::increment)),
        );
}
