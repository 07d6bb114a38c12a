/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses. This is the only
 * place where an error kind becomes a status code.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 401
 * }
 * ```
 *
 * Internal failures are logged here with their full detail and answered
 * with a generic message.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::{AuthError, BackendError};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if self.is_internal() {
            tracing::error!(error = %self, "Request failed with internal error");
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        BackendError::from(self).into_response()
    }
}

/// Build a bare status response for fallback routes
pub fn status_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "error": message,
        "status": status.as_u16(),
    });
    (status, Json(body)).into_response()
}
