//! HTTP error mapping. Each subsystem fault crosses the boundary as the
//! status code its contract calls for.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use vigil_core::errors::{PipelineError, VigilError};

/// Boundary-level error returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// A referenced resource does not exist.
    NotFound(String),
    /// The analysis exceeded its deadline.
    Timeout,
    /// A subsystem fault.
    Internal(VigilError),
}

impl From<VigilError> for ApiError {
    fn from(e: VigilError) -> Self {
        Self::Internal(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(VigilError::Storage(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(VigilError::Pipeline(PipelineError::InvalidRequest { .. })) => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(VigilError::Pipeline(PipelineError::Timeout { .. })) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::NotFound(what) => format!("{what} not found"),
            Self::Timeout => "analysis timed out".to_string(),
            Self::Internal(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(status = %status, error = %message, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::errors::StorageError;

    #[test]
    fn status_codes_follow_the_fault_boundary() {
        assert_eq!(
            ApiError::NotFound("run".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            ApiError::Internal(VigilError::Storage(StorageError::Unreachable {
                reason: "down".to_string()
            }))
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal(VigilError::Pipeline(PipelineError::InvalidRequest {
                reason: "region must be non-empty".to_string()
            }))
            .status(),
            StatusCode::BAD_REQUEST
        );
    }
}
