//! HTTP handlers and route configuration.

mod page;
mod proxy;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(page::index)).service(
        web::resource("/api/proxy")
            .route(web::get().to(proxy::forward))
            .default_service(web::to(proxy::method_not_allowed)),
    );
}
