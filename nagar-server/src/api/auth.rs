//! Phone OTP sign-in
//!
//! POST /api/auth/otp/send    { phone }        → code delivered by SMS
//! POST /api/auth/otp/verify  { phone, code }  → { token, citizen_id }
//! GET  /api/me                                → citizen profile

use axum::{Extension, Json, extract::State};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Citizen, LoginResponse, OtpSendRequest, OtpVerifyRequest, normalize_phone};
use shared::util::now_millis;

use super::ApiResult;
use super::body::AppJson;
use crate::auth::CitizenIdentity;
use crate::auth::citizen_auth::create_token;
use crate::auth::otp::{self, MAX_ATTEMPTS, OTP_TTL_MS};
use crate::db;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OtpSentResponse {
    pub phone: String,
    pub expires_at: i64,
}

fn parse_phone(raw: &str) -> Result<String, AppError> {
    normalize_phone(raw).ok_or_else(|| AppError::new(ErrorCode::InvalidPhoneNumber))
}

/// POST /api/auth/otp/send
pub async fn send_otp(
    State(state): State<AppState>,
    AppJson(req): AppJson<OtpSendRequest>,
) -> ApiResult<OtpSentResponse> {
    let phone = parse_phone(&req.phone)?;
    let now = now_millis();

    let code = otp::generate_code();
    let code_hash = otp::hash_code(&code).map_err(|e| {
        tracing::error!(%e, "OTP hash error");
        AppError::internal("Internal error")
    })?;

    let expires_at = now + OTP_TTL_MS;
    db::otp_verifications::upsert(&state.pool, &phone, &code_hash, expires_at, now).await?;

    state.otp_sender.send(&phone, &code).await.map_err(|e| {
        tracing::error!(phone = %phone, error = %e, "OTP delivery failed");
        AppError::new(ErrorCode::OtpDeliveryFailed)
    })?;

    tracing::info!(phone = %phone, "OTP sent");

    Ok(Json(OtpSentResponse { phone, expires_at }))
}

/// POST /api/auth/otp/verify
pub async fn verify_otp(
    State(state): State<AppState>,
    AppJson(req): AppJson<OtpVerifyRequest>,
) -> ApiResult<LoginResponse> {
    let phone = parse_phone(&req.phone)?;
    let now = now_millis();

    // Check and increment together so parallel guesses share one budget
    let Some(record) =
        db::otp_verifications::claim_attempt(&state.pool, &phone, MAX_ATTEMPTS, now).await?
    else {
        let pending = db::otp_verifications::find(&state.pool, &phone).await?;
        return Err(AppError::new(otp::refusal(pending.as_ref(), now)).into());
    };

    if !otp::verify_code(&req.code, &record.code) {
        tracing::info!(phone = %phone, attempts = record.attempts, "OTP mismatch");
        return Err(AppError::new(ErrorCode::OtpInvalid)
            .with_detail("attempts_left", MAX_ATTEMPTS - record.attempts)
            .into());
    }

    db::otp_verifications::delete(&state.pool, &phone).await?;
    let citizen = db::citizens::upsert_by_phone(&state.pool, &phone, now).await?;

    let token = create_token(citizen.id, &citizen.phone, &state.jwt_secret).map_err(|e| {
        tracing::error!(%e, "JWT creation error");
        AppError::internal("Internal error")
    })?;

    tracing::info!(citizen_id = citizen.id, "Citizen signed in");

    Ok(Json(LoginResponse {
        token,
        citizen_id: citizen.id,
    }))
}

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<CitizenIdentity>,
) -> ApiResult<Citizen> {
    let citizen = db::citizens::find_by_id(&state.pool, identity.citizen_id)
        .await?
        .ok_or_else(|| AppError::not_found("Citizen"))?;
    Ok(Json(citizen))
}
