//! AppError and the JSON error body it renders to

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error carried from a handler to the client
///
/// `code` picks the HTTP status, `message` is shown to the citizen and
/// `details` holds machine-readable context such as the offending field.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{resource} not found"))
            .with_detail("resource", resource)
    }

    /// Unknown tracking code; the code is echoed back in `details`
    pub fn complaint_not_found(complaint_code: impl Into<String>) -> Self {
        Self::new(ErrorCode::ComplaintNotFound).with_detail("complaint_code", complaint_code.into())
    }

    /// Missing or blank field named `field`
    pub fn required(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error occurred");
        }
        (self.http_status(), axum::Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::ComplaintNotFound);
        assert_eq!(
            err.message,
            "Complaint not found, please check the complaint ID and try again"
        );
        assert!(err.details.is_none());
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::with_message(ErrorCode::UnsupportedState, "Only Karnataka for now")
            .with_detail("state", "Goa")
            .with_detail("supported", serde_json::json!(["Karnataka"]));

        let details = err.details.unwrap();
        assert_eq!(details.get("state").unwrap(), "Goa");
        assert_eq!(details.len(), 2);
    }

    #[test]
    fn test_constructors() {
        let err = AppError::complaint_not_found("NGR123456");
        assert_eq!(err.code, ErrorCode::ComplaintNotFound);
        assert_eq!(
            err.details.as_ref().unwrap().get("complaint_code").unwrap(),
            "NGR123456"
        );

        let err = AppError::required("city");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "city is required");
        assert_eq!(err.details.unwrap().get("field").unwrap(), "city");

        let err = AppError::not_found("Citizen");
        assert_eq!(err.message, "Citizen not found");

        assert_eq!(AppError::token_expired().http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::internal("boom").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_is_message() {
        let err = AppError::with_message(ErrorCode::OtpInvalid, "Wrong code");
        assert_eq!(err.to_string(), "Wrong code");
    }

    #[test]
    fn test_error_body_shape() {
        let err = AppError::new(ErrorCode::OtpInvalid).with_detail("attempts_left", 2);
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": 1104,
                "message": "Invalid OTP",
                "details": { "attempts_left": 2 }
            })
        );

        let bare = serde_json::to_value(ErrorBody::from(&AppError::not_authenticated())).unwrap();
        assert!(bare.get("details").is_none());
    }

    #[tokio::test]
    async fn test_into_response_status_and_body() {
        use axum::response::IntoResponse;

        let response = AppError::required("issue_type").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.code, ErrorCode::RequiredField.code());
        assert_eq!(body.details.unwrap().get("field").unwrap(), "issue_type");
    }
}
