//! Error handling for the proxy route.

use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header},
};
use hitcount_core::ProxyError;
use hitcount_shared::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Proxy(#[from] ProxyError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Proxy(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::MethodNotAllowed => HttpResponse::MethodNotAllowed()
                .insert_header((header::ALLOW, "GET"))
                .json(ErrorBody::method_not_allowed()),
            AppError::Proxy(e) => {
                tracing::error!(error = %e, "Proxy error");
                HttpResponse::InternalServerError().json(ErrorBody::proxy_failure(e.to_string()))
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
