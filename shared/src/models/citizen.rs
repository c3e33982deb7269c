//! Citizen accounts (phone OTP login)

use serde::{Deserialize, Serialize};

/// Citizen record, keyed by normalized phone number
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Citizen {
    pub id: i64,
    pub phone: String,
    pub created_at: i64,
    pub last_login_at: i64,
}

/// Request an OTP
#[derive(Debug, Clone, Deserialize)]
pub struct OtpSendRequest {
    pub phone: String,
}

/// Verify an OTP
#[derive(Debug, Clone, Deserialize)]
pub struct OtpVerifyRequest {
    pub phone: String,
    pub code: String,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub citizen_id: i64,
}

/// Normalize a phone number: optional leading `+`, then 10-15 digits.
///
/// Spaces, dashes and parentheses are stripped. Returns `None` when the
/// remainder is not a plausible phone number.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let (plus, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", trimmed),
    };
    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '(' | ')' => {}
            _ => return None,
        }
    }
    if !(10..=15).contains(&digits.len()) {
        return None;
    }
    Some(format!("{plus}{digits}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(
            normalize_phone("+91 98765-43210").as_deref(),
            Some("+919876543210")
        );
        assert_eq!(normalize_phone("9876543210").as_deref(), Some("9876543210"));
        assert_eq!(normalize_phone("12345"), None);
        assert_eq!(normalize_phone("98765x43210"), None);
        assert_eq!(normalize_phone("++919876543210"), None);
    }
}
