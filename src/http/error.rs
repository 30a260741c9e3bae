use crate::protocol::{ErrorCode, ErrorKind, RegistryError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub error_code: ErrorCode,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Capacity => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Transport => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind());
        if status.is_server_error() {
            tracing::warn!(error = %self, "Request failed on broker");
        }

        let body = ErrorBody {
            error: self.to_string(),
            error_code: self.error_code(),
        };
        (status, Json(body)).into_response()
    }
}
