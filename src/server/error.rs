use crate::error::QueryError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Any per-request failure. Always rendered as 400 `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError(pub QueryError);

impl From<QueryError> for ApiError {
    fn from(error: QueryError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "request failed");

        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
