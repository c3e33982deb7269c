use shared::models::Citizen;
use sqlx::PgPool;

/// Create the citizen on first login, otherwise bump `last_login_at`
pub async fn upsert_by_phone(pool: &PgPool, phone: &str, now: i64) -> Result<Citizen, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO citizens (phone, created_at, last_login_at)
         VALUES ($1, $2, $2)
         ON CONFLICT (phone) DO UPDATE SET last_login_at = $2
         RETURNING *",
    )
    .bind(phone)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Citizen>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM citizens WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
