//! HTTP mapping for `PresenceError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use presence_core::error::{ClientCode, PresenceError};

/// Response-side wrapper so handlers can `?` core errors.
#[derive(Debug)]
pub struct ApiError(pub PresenceError);

impl From<PresenceError> for ApiError {
    fn from(e: PresenceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
