use sqlx::PgPool;

#[derive(sqlx::FromRow)]
pub struct OtpVerification {
    pub phone: String,
    /// argon2 hash of the code
    pub code: String,
    pub attempts: i32,
    pub expires_at: i64,
    pub created_at: i64,
}

pub async fn upsert(
    pool: &PgPool,
    phone: &str,
    code_hash: &str,
    expires_at: i64,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO otp_verifications (phone, code, attempts, expires_at, created_at)
         VALUES ($1, $2, 0, $3, $4)
         ON CONFLICT (phone) DO UPDATE SET
            code = $2, attempts = 0, expires_at = $3, created_at = $4",
    )
    .bind(phone)
    .bind(code_hash)
    .bind(expires_at)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find(pool: &PgPool, phone: &str) -> Result<Option<OtpVerification>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM otp_verifications WHERE phone = $1")
        .bind(phone)
        .fetch_optional(pool)
        .await
}

/// Count one guess against a live code in a single statement
///
/// Returns the row after the increment, or `None` when there is no code,
/// it has expired, or it already used up `max_attempts`. Concurrent
/// callers cannot claim more than `max_attempts` guesses between them.
pub async fn claim_attempt(
    pool: &PgPool,
    phone: &str,
    max_attempts: i32,
    now: i64,
) -> Result<Option<OtpVerification>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE otp_verifications SET attempts = attempts + 1
         WHERE phone = $1 AND attempts < $2 AND expires_at >= $3
         RETURNING *",
    )
    .bind(phone)
    .bind(max_attempts)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, phone: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM otp_verifications WHERE phone = $1")
        .bind(phone)
        .execute(pool)
        .await?;
    Ok(())
}

/// Drop codes that expired before `now`; returns how many were removed
pub async fn delete_expired(pool: &PgPool, now: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM otp_verifications WHERE expires_at < $1")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
