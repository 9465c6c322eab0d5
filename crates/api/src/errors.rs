use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dnswatch_domain::DomainError;
use serde_json::json;

pub const INVALID_REQUEST_FORMAT: &str = "Invalid request format";

pub enum ApiError {
    InvalidRequest,
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidRequest => {
                (StatusCode::BAD_REQUEST, INVALID_REQUEST_FORMAT.to_string())
            }
            // The only caller-visible reporting error is a blank hostname
            ApiError::Domain(DomainError::ReportingError(_)) => {
                (StatusCode::BAD_REQUEST, INVALID_REQUEST_FORMAT.to_string())
            }
            ApiError::Domain(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
