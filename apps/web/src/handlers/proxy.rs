//! Same-origin proxy to the counter API.

use actix_web::{HttpResponse, http::StatusCode, web};
use hitcount_core::ProxyError;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/proxy - relay the backend's `/api` status and body unchanged.
///
/// A 429 or 500 from the backend is still a reply and is passed through;
/// only transport failures become a proxy-level 500.
pub async fn forward(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let reply = state.backend.fetch_count().await?;

    let status = StatusCode::from_u16(reply.status).map_err(|_| {
        ProxyError::InvalidBody(format!("unexpected status {}", reply.status))
    })?;
    tracing::debug!(status = reply.status, "Backend replied");

    let mut response = HttpResponse::build(status);
    for (name, value) in &reply.headers {
        response.insert_header((name.as_str(), value.as_str()));
    }
    Ok(response.json(reply.body))
}

/// Any other method on /api/proxy.
pub async fn method_not_allowed() -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed)
}
