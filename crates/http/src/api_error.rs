//! Typed API error for HTTP handlers.
//!
//! Converts service errors into HTTP responses with a JSON body and status code.
//! Handlers return `Result<Json<T>, ApiError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use healthstat_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` variant logs the real error server-side and returns
/// a static message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: malformed or missing parameter.
    BadRequest(String),
    /// 404 Not Found: no observation matches the requested pair.
    NotFound(String),
    /// 500 Internal Server Error: unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
    /// 503 Service Unavailable: the store timed out or is unreachable.
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
            Self::ServiceUnavailable(msg) => {
                tracing::warn!(error = %msg, "store unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "store unavailable".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        if err.is_unavailable() {
            return Self::ServiceUnavailable(err.to_string());
        }
        match err {
            ServiceError::InvalidFilter(_) | ServiceError::InvalidInput(_) => {
                Self::BadRequest(err.to_string())
            },
            ServiceError::NotFound { .. } => Self::NotFound(err.to_string()),
            _ => Self::Internal(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use healthstat_core::FilterError;
    use healthstat_storage::StorageError;

    use super::*;

    fn status_of(err: ServiceError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(
            status_of(ServiceError::InvalidFilter(FilterError::InvalidYear("x".to_owned()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(ServiceError::InvalidInput("x".to_owned())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(ServiceError::NotFound {
                disease: "a".to_owned(),
                indicator: "b".to_owned()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ServiceError::Storage(StorageError::Unavailable("timed out".into()))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(ServiceError::Storage(StorageError::DataCorruption("bad row".to_owned()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
