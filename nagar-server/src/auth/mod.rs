//! Authentication and request throttling

pub mod admin_auth;
pub mod citizen_auth;
pub mod otp;
pub mod rate_limit;

pub use citizen_auth::{CitizenIdentity, OptionalCitizen};

use http::HeaderMap;
use shared::error::AppError;

/// Bearer token from the Authorization header.
///
/// `Ok(None)` when the header is absent, an error when it is present but
/// not a bearer credential.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get(http::header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AppError::invalid_token("Invalid Authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(Some)
        .ok_or_else(|| AppError::invalid_token("Invalid Authorization format"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use shared::error::ErrorCode;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers).unwrap(), None);

        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).unwrap(), Some("abc.def"));

        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(
            bearer_token(&headers).unwrap_err().code,
            ErrorCode::TokenInvalid
        );
    }
}
