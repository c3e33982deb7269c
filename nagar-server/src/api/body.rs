//! JSON body extractor with `AppError` rejections
//!
//! axum's own `Json` rejects with a plain-text body. Handlers take
//! [`AppJson`] instead so a missing field comes back as `RequiredField`
//! with the same shape as every other validation error.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};

pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(rejection_error(rejection)),
        }
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(e) => {
            let text = e.body_text();
            match missing_field(&text) {
                Some(field) => AppError::required(field),
                None => AppError::with_message(ErrorCode::ValidationFailed, text),
            }
        }
        JsonRejection::JsonSyntaxError(e) => {
            AppError::with_message(ErrorCode::InvalidFormat, e.body_text())
        }
        other => AppError::with_message(ErrorCode::InvalidRequest, other.body_text()),
    }
}

/// Field name out of serde's "missing field `name`" message
fn missing_field(text: &str) -> Option<&str> {
    let rest = text.split_once("missing field `")?.1;
    rest.split_once('`').map(|(field, _)| field)
}
