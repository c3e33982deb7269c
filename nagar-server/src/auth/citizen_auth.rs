//! Citizen JWT sessions

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use http::request::Parts;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use super::bearer_token;
use crate::state::AppState;

/// JWT claims for citizen sessions
#[derive(Debug, Serialize, Deserialize)]
pub struct CitizenClaims {
    /// Citizen ID
    pub sub: String,
    /// Normalized phone number
    pub phone: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated citizen extracted from JWT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitizenIdentity {
    pub citizen_id: i64,
    pub phone: String,
}

const JWT_EXPIRY_HOURS: i64 = 24;

pub fn create_token(
    citizen_id: i64,
    phone: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = CitizenClaims {
        sub: citizen_id.to_string(),
        phone: phone.to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_token(token: &str, secret: &str) -> Result<CitizenIdentity, AppError> {
    let token_data = jsonwebtoken::decode::<CitizenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    let citizen_id = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::invalid_token("Invalid token subject"))?;

    Ok(CitizenIdentity {
        citizen_id,
        phone: token_data.claims.phone,
    })
}

/// Requires a valid citizen JWT; inserts [`CitizenIdentity`] into extensions
pub async fn citizen_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?.ok_or_else(AppError::not_authenticated)?;
    let identity = verify_token(token, &state.jwt_secret)?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Citizen identity when a token is sent, `None` for anonymous requests.
///
/// A token that is present but invalid is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalCitizen(pub Option<CitizenIdentity>);

impl FromRequestParts<AppState> for OptionalCitizen {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer_token(&parts.headers)? {
            Some(token) => Ok(OptionalCitizen(Some(verify_token(token, &state.jwt_secret)?))),
            None => Ok(OptionalCitizen(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip() {
        let token = create_token(42, "+919876543210", SECRET).unwrap();
        let identity = verify_token(&token, SECRET).unwrap();
        assert_eq!(
            identity,
            CitizenIdentity {
                citizen_id: 42,
                phone: "+919876543210".into(),
            }
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_token(42, "+919876543210", SECRET).unwrap();
        let err = verify_token(&token, "other-secret").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_expired_token() {
        let now = chrono::Utc::now();
        let claims = CitizenClaims {
            sub: "42".into(),
            phone: "+919876543210".into(),
            exp: (now - chrono::Duration::hours(2)).timestamp() as usize,
            iat: (now - chrono::Duration::hours(26)).timestamp() as usize,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = verify_token(&token, SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
    }

    #[test]
    fn test_non_numeric_subject_is_invalid() {
        let now = chrono::Utc::now();
        let claims = CitizenClaims {
            sub: "citizen-42".into(),
            phone: "+919876543210".into(),
            exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            verify_token(&token, SECRET).unwrap_err().code,
            ErrorCode::TokenInvalid
        );
    }
}
