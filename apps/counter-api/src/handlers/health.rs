//! Health check endpoint.

use actix_web::HttpResponse;
use hitcount_shared::HealthResponse;

/// Liveness probe. Never touches the counter store.
///
/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::ok())
}
