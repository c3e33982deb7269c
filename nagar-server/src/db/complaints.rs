//! Complaint rows

use shared::models::{Complaint, ComplaintCreate, ComplaintStatus, IssueType};
use sqlx::{PgExecutor, PgPool};

use crate::error::{ServiceError, ServiceResult};

/// Raw row; enum columns are validated on conversion
#[derive(sqlx::FromRow)]
pub struct ComplaintRow {
    pub id: i64,
    pub complaint_code: String,
    pub issue_type: String,
    pub description: String,
    pub state: String,
    pub city: String,
    pub media_url: Option<String>,
    pub voice_note_url: Option<String>,
    pub status: String,
    pub citizen_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TryFrom<ComplaintRow> for Complaint {
    type Error = ServiceError;

    fn try_from(row: ComplaintRow) -> Result<Self, Self::Error> {
        Ok(Complaint {
            id: row.id,
            complaint_code: row.complaint_code,
            issue_type: IssueType::parse(&row.issue_type)?,
            description: row.description,
            state: row.state,
            city: row.city,
            media_url: row.media_url,
            voice_note_url: row.voice_note_url,
            status: ComplaintStatus::parse(&row.status)?,
            citizen_id: row.citizen_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn convert(row: Option<ComplaintRow>) -> ServiceResult<Option<Complaint>> {
    row.map(Complaint::try_from).transpose()
}

/// Insert a new complaint at `Registered`.
///
/// Returns `None` when `code` is already taken so the caller can retry with
/// a fresh one.
pub async fn insert<'e>(
    ex: impl PgExecutor<'e>,
    code: &str,
    req: &ComplaintCreate,
    citizen_id: Option<i64>,
    now: i64,
) -> ServiceResult<Option<Complaint>> {
    let row: Option<ComplaintRow> = sqlx::query_as(
        "INSERT INTO complaints (
            complaint_code, issue_type, description, state, city,
            media_url, voice_note_url, status, citizen_id, created_at, updated_at
         )
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
         ON CONFLICT (complaint_code) DO NOTHING
         RETURNING *",
    )
    .bind(code)
    .bind(req.issue_type.as_str())
    .bind(&req.description)
    .bind(&req.state)
    .bind(&req.city)
    .bind(&req.media_url)
    .bind(&req.voice_note_url)
    .bind(ComplaintStatus::Registered.as_str())
    .bind(citizen_id)
    .bind(now)
    .fetch_optional(ex)
    .await?;
    convert(row)
}

pub async fn find_by_code<'e>(
    ex: impl PgExecutor<'e>,
    code: &str,
) -> ServiceResult<Option<Complaint>> {
    let row = sqlx::query_as("SELECT * FROM complaints WHERE complaint_code = $1")
        .bind(code)
        .fetch_optional(ex)
        .await?;
    convert(row)
}

/// Same as [`find_by_code`] but locks the row until the transaction ends
pub async fn find_by_code_for_update<'e>(
    ex: impl PgExecutor<'e>,
    code: &str,
) -> ServiceResult<Option<Complaint>> {
    let row = sqlx::query_as("SELECT * FROM complaints WHERE complaint_code = $1 FOR UPDATE")
        .bind(code)
        .fetch_optional(ex)
        .await?;
    convert(row)
}

pub async fn update_status<'e>(
    ex: impl PgExecutor<'e>,
    complaint_id: i64,
    status: ComplaintStatus,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE complaints SET status = $1, updated_at = $2 WHERE id = $3")
        .bind(status.as_str())
        .bind(now)
        .bind(complaint_id)
        .execute(ex)
        .await?;
    Ok(())
}

/// A citizen's complaints, newest first
pub async fn list_by_citizen(
    pool: &PgPool,
    citizen_id: i64,
    limit: i64,
) -> ServiceResult<Vec<Complaint>> {
    let rows: Vec<ComplaintRow> = sqlx::query_as(
        "SELECT * FROM complaints WHERE citizen_id = $1
         ORDER BY created_at DESC, id DESC
         LIMIT $2",
    )
    .bind(citizen_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Complaint::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::{AppError, ErrorCode};

    fn row(status: &str, issue_type: &str) -> ComplaintRow {
        ComplaintRow {
            id: 7,
            complaint_code: "NGR123456".into(),
            issue_type: issue_type.into(),
            description: "Streetlight out near the bus stop".into(),
            state: "Karnataka".into(),
            city: "Mysuru".into(),
            media_url: None,
            voice_note_url: None,
            status: status.into(),
            citizen_id: None,
            created_at: 1_000,
            updated_at: 2_000,
        }
    }

    #[test]
    fn test_row_converts_hyphenated_status() {
        let complaint = Complaint::try_from(row("In-Progress", "streetlight")).unwrap();
        assert_eq!(complaint.status, ComplaintStatus::InProgress);
        assert_eq!(complaint.issue_type, IssueType::Streetlight);
    }

    #[test]
    fn test_row_with_foreign_status_is_rejected() {
        let err = Complaint::try_from(row("Closed", "pothole")).unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::UnknownStatus);
    }

    #[test]
    fn test_row_with_foreign_issue_type_is_rejected() {
        let err = Complaint::try_from(row("Registered", "earthquake")).unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::UnknownIssueType);
    }
}
