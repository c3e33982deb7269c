//! Static bearer token guarding the admin status-update routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use shared::error::{AppError, ErrorCode};

use super::bearer_token;
use crate::state::AppState;

/// Compare digests so the comparison time does not depend on the input
fn tokens_match(presented: &str, expected: &str) -> bool {
    let a = Sha256::digest(presented.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?.ok_or_else(AppError::not_authenticated)?;

    if !tokens_match(token, &state.admin_token) {
        tracing::warn!(path = %request.uri().path(), "Rejected admin request");
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match("s3cret-admin", "s3cret-admin"));
        assert!(!tokens_match("s3cret-admin", "s3cret-admim"));
        assert!(!tokens_match("", "s3cret-admin"));
    }
}
