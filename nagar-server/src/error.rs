//! Service-layer error type
//!
//! `ServiceError` bridges DB-layer errors (`sqlx::Error`, `BoxError`) and the
//! API-layer `AppError`, so handlers can use `?` on both.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use shared::models::{UnknownIssueType, UnknownStatus};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum ServiceError {
    /// Database or infrastructure error (logged, surfaced as InternalError)
    Db(BoxError),
    /// Business-rule error, passed through to the client
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

/// A stored status outside the lifecycle is a data-integrity fault
impl From<UnknownStatus> for ServiceError {
    fn from(e: UnknownStatus) -> Self {
        tracing::error!(status = %e.0, "Stored complaint status is not part of the lifecycle");
        ServiceError::App(
            AppError::new(ErrorCode::UnknownStatus).with_detail("status", e.0),
        )
    }
}

impl From<UnknownIssueType> for ServiceError {
    fn from(e: UnknownIssueType) -> Self {
        tracing::error!(issue_type = %e.0, "Stored issue type is not recognised");
        ServiceError::App(
            AppError::new(ErrorCode::UnknownIssueType).with_detail("issue_type", e.0),
        )
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_maps_to_integrity_error() {
        let err: ServiceError = UnknownStatus("Closed".into()).into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::UnknownStatus);
        assert_eq!(app.http_status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_db_error_is_hidden_from_client() {
        let err = ServiceError::Db("connection reset".into());
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InternalError);
        assert!(!app.message.contains("connection reset"));
    }

    #[test]
    fn test_app_error_passes_through() {
        let err: ServiceError = AppError::complaint_not_found("NGR000001").into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ComplaintNotFound);
    }
}
