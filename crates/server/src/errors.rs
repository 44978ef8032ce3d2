use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::{directory_client::DirectoryClientError, errors::ServiceError};
use thiserror::Error;
use tracing::error;

/// Error body `{"error": "..."}` with the status chosen by the failing layer.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        error!(error = %e, "store failure");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

// 上游（customer directory）不可达或返回非 2xx，一律按网关错误处理
impl From<DirectoryClientError> for ApiError {
    fn from(e: DirectoryClientError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage init failed: {0}")]
    Storage(#[from] ServiceError),
}
