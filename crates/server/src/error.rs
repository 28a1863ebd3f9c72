use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the course handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid course ID")]
    InvalidId,

    #[error("Course not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Failed to encode update payload")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("Database operation failed")]
    Store(#[from] mongodb::error::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidId | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Encode(err) => {
                error!("update payload encoding failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Store(err) => {
                // The store detail goes to the log; clients only see the
                // generic message.
                error!("store operation failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_invalid_id_and_validation_to_400() {
        assert_eq!(
            ApiError::InvalidId.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Validation("limit must be between 1 and 100".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn maps_not_found_to_404() {
        assert_eq!(
            ApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
