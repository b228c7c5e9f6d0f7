//! Error handling - every failure becomes a JSON `ErrorBody`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use hitcount_core::StoreError;
use hitcount_shared::ErrorBody;

/// Application-level error type for handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Counter store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::StoreUnavailable(detail) => {
                tracing::error!(detail = %detail, "Counter store unavailable");
                ErrorBody::internal(format!("Counter store unavailable: {detail}"))
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

// Connect failures end the process at startup, so handlers only ever see
// `Unavailable`; both carry the same diagnostic.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(detail) | StoreError::ConnectFailure(detail) => {
                AppError::StoreUnavailable(detail)
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn store_unavailable_is_500_json() {
        let err = AppError::from(StoreError::Unavailable("command timed out".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
        assert_eq!(json["message"], "Counter store unavailable: command timed out");
    }

    #[test]
    fn every_store_error_is_a_store_500() {
        let err = AppError::from(StoreError::ConnectFailure("refused".into()));
        assert!(matches!(err, AppError::StoreUnavailable(ref d) if d == "refused"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
