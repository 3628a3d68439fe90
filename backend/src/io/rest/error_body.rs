use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use shared::ErrorBody;

use crate::domain::DomainError;

/// Wrapper translating a `DomainError` into an HTTP response.
///
/// Validation and conflict messages are caller-fixable and surfaced
/// verbatim; persistence failures are logged and replaced with a generic
/// message so store details never leak.
pub struct ApiError(pub DomainError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            DomainError::Validation(message) | DomainError::Conflict(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { message })).into_response()
            }
            DomainError::Persistence(e) => {
                error!("Store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        message: "An unexpected error occurred.".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// 404 body for a missing entity.
pub fn not_found(entity: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: format!("{} not found.", entity),
        }),
    )
        .into_response()
}
