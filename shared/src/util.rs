/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Prefix of every complaint code
pub const COMPLAINT_CODE_PREFIX: &str = "NGR";

/// Generate a complaint code such as `NGR482913`.
///
/// Six random digits; uniqueness is enforced by the database and callers
/// retry on collision.
pub fn generate_complaint_code() -> String {
    use rand::Rng;
    let digits: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    format!("{COMPLAINT_CODE_PREFIX}{digits}")
}

/// Normalize user input of a complaint code for lookup
pub fn normalize_complaint_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_shape() {
        for _ in 0..100 {
            let code = generate_complaint_code();
            assert_eq!(code.len(), 9);
            assert!(code.starts_with("NGR"));
            assert!(code[3..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_complaint_code("  ngr123456 "), "NGR123456");
    }
}
