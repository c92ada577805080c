//! Request extraction helpers.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Unwrap a JSON body, mapping axum's rejection to a 422 [`AppError`].
///
/// Handlers take `Result<Json<T>, JsonRejection>` so that malformed bodies
/// answer with the service's error shape instead of axum's plain text.
pub fn extract_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        AppError::from(rejection)
    })
}
