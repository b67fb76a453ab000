//! Request-level errors for the readiness endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pod_readiness::{DEFAULT_KEY, ReadinessError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("query parameter 'key' must not be '{}'", DEFAULT_KEY)]
    ReservedKey,

    #[error("invalid readiness body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Readiness(ReadinessError),
}

impl From<ReadinessError> for ApiError {
    fn from(err: ReadinessError) -> Self {
        match err {
            ReadinessError::ReservedKey => ApiError::ReservedKey,
            other => ApiError::Readiness(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ReservedKey | ApiError::Decode(_) | ApiError::Readiness(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "readiness request rejected");
        (status, self.to_string()).into_response()
    }
}
