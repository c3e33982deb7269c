//! One-time login codes

use shared::error::ErrorCode;

use crate::db::otp_verifications::OtpVerification;

/// Code lifetime (5 minutes)
pub const OTP_TTL_MS: i64 = 5 * 60 * 1000;

/// Wrong guesses allowed before a new code must be requested
pub const MAX_ATTEMPTS: i32 = 3;

pub fn generate_code() -> String {
    use rand::Rng;
    let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    code.to_string()
}

pub fn hash_code(code: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(code.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_code(code: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(code.trim().as_bytes(), &parsed)
        .is_ok()
}

/// Why no guess could be claimed against the stored code
pub fn refusal(pending: Option<&OtpVerification>, now: i64) -> ErrorCode {
    match pending {
        None => ErrorCode::OtpNotRequested,
        Some(record) if now > record.expires_at => ErrorCode::OtpExpired,
        Some(_) => ErrorCode::TooManyAttempts,
    }
}
