//! Status update rows (append-only)

use shared::models::{ComplaintStatus, StatusUpdate, StatusUpdateCreate};
use sqlx::PgExecutor;

use crate::error::{ServiceError, ServiceResult};

#[derive(sqlx::FromRow)]
pub struct StatusUpdateRow {
    pub id: i64,
    pub complaint_id: i64,
    pub status: String,
    pub assigned_to: Option<String>,
    pub assigned_contact: Option<String>,
    pub note: Option<String>,
    pub created_at: i64,
}

impl TryFrom<StatusUpdateRow> for StatusUpdate {
    type Error = ServiceError;

    fn try_from(row: StatusUpdateRow) -> Result<Self, Self::Error> {
        Ok(StatusUpdate {
            id: row.id,
            complaint_id: row.complaint_id,
            status: ComplaintStatus::parse(&row.status)?,
            assigned_to: row.assigned_to,
            assigned_contact: row.assigned_contact,
            note: row.note,
            created_at: row.created_at,
        })
    }
}

pub async fn append<'e>(
    ex: impl PgExecutor<'e>,
    complaint_id: i64,
    update: &StatusUpdateCreate,
    now: i64,
) -> ServiceResult<StatusUpdate> {
    let row: StatusUpdateRow = sqlx::query_as(
        "INSERT INTO complaint_status_updates
            (complaint_id, status, assigned_to, assigned_contact, note, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(complaint_id)
    .bind(update.status.as_str())
    .bind(&update.assigned_to)
    .bind(&update.assigned_contact)
    .bind(&update.note)
    .bind(now)
    .fetch_one(ex)
    .await?;
    row.try_into()
}

/// All updates for a complaint in ascending `created_at` order
pub async fn list_for_complaint<'e>(
    ex: impl PgExecutor<'e>,
    complaint_id: i64,
) -> ServiceResult<Vec<StatusUpdate>> {
    let rows: Vec<StatusUpdateRow> = sqlx::query_as(
        "SELECT * FROM complaint_status_updates
         WHERE complaint_id = $1
         ORDER BY created_at ASC, id ASC",
    )
    .bind(complaint_id)
    .fetch_all(ex)
    .await?;
    rows.into_iter().map(StatusUpdate::try_from).collect()
}
