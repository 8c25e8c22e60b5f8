use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as a user-visible message; nothing here is allowed to
/// escape as a panic or a dropped connection.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Generation service error: {0}")]
    Service(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        if err.is_authentication() {
            AppError::Authentication(err.to_string())
        } else {
            AppError::Service(err.to_string())
        }
    }
}

impl AppError {
    /// The message shown to the end user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::PayloadTooLarge(_) => {
                "The uploaded resume is larger than the allowed size.".to_string()
            }
            AppError::Extraction(_) => {
                "The uploaded resume could not be read. Please upload a valid PDF file.".to_string()
            }
            AppError::Authentication(_) => {
                "The analysis service is not configured with a valid API key.".to_string()
            }
            AppError::Service(_) => {
                "The analysis service failed to produce a result. Please try again later."
                    .to_string()
            }
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            AppError::Extraction(_) => (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_ERROR"),
            AppError::Authentication(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "AUTHENTICATION_ERROR")
            }
            AppError::Service(_) => (StatusCode::BAD_GATEWAY, "SERVICE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(msg) => tracing::info!("Rejected request: {msg}"),
            AppError::PayloadTooLarge(msg) => tracing::info!("Rejected upload: {msg}"),
            AppError::Extraction(e) => tracing::warn!("Extraction error: {e}"),
            AppError::Authentication(msg) => tracing::error!("Authentication error: {msg}"),
            AppError::Service(msg) => tracing::error!("Generation service error: {msg}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        let (status, code) = self.status_and_code();
        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.user_message()
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_maps_to_authentication() {
        let err: AppError = LlmError::MissingApiKey.into();
        assert!(matches!(err, AppError::Authentication(_)));
        assert_eq!(err.status_and_code().1, "AUTHENTICATION_ERROR");
    }

    #[test]
    fn test_empty_content_maps_to_service() {
        let err: AppError = LlmError::EmptyContent.into();
        assert!(matches!(err, AppError::Service(_)));
        assert_eq!(err.status_and_code().0, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = AppError::Validation("Please provide a Job Description.".to_string());
        assert_eq!(err.user_message(), "Please provide a Job Description.");
    }

    #[test]
    fn test_payload_too_large_is_413() {
        let err = AppError::PayloadTooLarge("length limit exceeded".to_string());
        assert_eq!(
            err.status_and_code(),
            (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE")
        );
        assert_eq!(
            err.user_message(),
            "The uploaded resume is larger than the allowed size."
        );
    }

    #[test]
    fn test_service_message_hides_upstream_detail() {
        let err = AppError::Service("API error (status 500): backend exploded".to_string());
        assert!(!err.user_message().contains("exploded"));
    }
}
