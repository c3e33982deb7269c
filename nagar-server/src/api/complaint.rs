//! Complaint submission and tracking
//!
//! POST /api/complaints              submit (anonymous or signed-in citizen)
//! GET  /api/complaints/{code}       tracking view (`?lang=en|hi|bn|te`)
//! GET  /api/me/complaints           the signed-in citizen's complaints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::Language;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Complaint, ComplaintCreate, ComplaintReceipt, ComplaintStatus, StatusUpdateCreate,
    is_supported_state,
};
use shared::util::{generate_complaint_code, now_millis};

use super::ApiResult;
use super::body::AppJson;
use crate::auth::{CitizenIdentity, OptionalCitizen};
use crate::db;
use crate::state::AppState;
use crate::tracking::{self, TrackingView};

/// Fresh codes tried before giving up
const MAX_CODE_ATTEMPTS: usize = 5;

const MY_COMPLAINTS_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

impl LangQuery {
    pub fn language(&self) -> Language {
        self.lang
            .as_deref()
            .map(Language::from_code)
            .unwrap_or_default()
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn check_url(field: &str, value: &Option<String>) -> Result<(), AppError> {
    match value {
        Some(url) if !(url.starts_with("https://") || url.starts_with("http://")) => {
            Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("{field} must be an http(s) URL"),
            )
            .with_detail("field", field))
        }
        _ => Ok(()),
    }
}

/// Trim the payload and enforce the submission rules
pub fn validate_submission(req: ComplaintCreate) -> Result<ComplaintCreate, AppError> {
    let state = req.state.trim().to_string();
    let city = req.city.trim().to_string();
    let description = req.description.trim().to_string();
    let media_url = clean(req.media_url);
    let voice_note_url = clean(req.voice_note_url);

    if state.is_empty() {
        return Err(AppError::required("state"));
    }
    if city.is_empty() {
        return Err(AppError::required("city"));
    }
    if !is_supported_state(&state) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedState,
            format!("Unsupported state: {state}"),
        )
        .with_detail("state", state));
    }
    if description.is_empty() && voice_note_url.is_none() {
        return Err(AppError::new(ErrorCode::DescriptionRequired));
    }
    check_url("media_url", &media_url)?;
    check_url("voice_note_url", &voice_note_url)?;

    Ok(ComplaintCreate {
        state,
        city,
        issue_type: req.issue_type,
        description,
        media_url,
        voice_note_url,
    })
}

/// POST /api/complaints
pub async fn submit(
    State(state): State<AppState>,
    OptionalCitizen(citizen): OptionalCitizen,
    AppJson(req): AppJson<ComplaintCreate>,
) -> ApiResult<ComplaintReceipt> {
    let req = validate_submission(req)?;
    let citizen_id = citizen.map(|c| c.citizen_id);
    let initial = StatusUpdateCreate {
        status: ComplaintStatus::Registered,
        assigned_to: None,
        assigned_contact: None,
        note: None,
    };

    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let code = generate_complaint_code();
        let now = now_millis();

        let mut tx = state.pool.begin().await?;
        let Some(complaint) =
            db::complaints::insert(&mut *tx, &code, &req, citizen_id, now).await?
        else {
            tracing::warn!(attempt, code = %code, "Complaint code already taken, retrying");
            continue;
        };
        db::status_updates::append(&mut *tx, complaint.id, &initial, now).await?;
        tx.commit().await?;

        tracing::info!(
            complaint_id = complaint.id,
            code = %complaint.complaint_code,
            issue_type = %complaint.issue_type,
            city = %complaint.city,
            citizen_id = ?citizen_id,
            "Complaint registered"
        );

        return Ok(Json(ComplaintReceipt {
            complaint_code: complaint.complaint_code,
            status: complaint.status,
            created_at: complaint.created_at,
        }));
    }

    tracing::error!("No free complaint code after {MAX_CODE_ATTEMPTS} attempts");
    Err(AppError::new(ErrorCode::ComplaintCodeExhausted).into())
}

/// GET /api/complaints/{code}
pub async fn track(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<LangQuery>,
) -> ApiResult<TrackingView> {
    let view = tracking::track(&state.source(), &code, query.language(), &state.time_format).await?;
    Ok(Json(view))
}

/// GET /api/me/complaints
pub async fn my_complaints(
    State(state): State<AppState>,
    Extension(identity): Extension<CitizenIdentity>,
) -> ApiResult<Vec<Complaint>> {
    let complaints =
        db::complaints::list_by_citizen(&state.pool, identity.citizen_id, MY_COMPLAINTS_LIMIT)
            .await?;
    Ok(Json(complaints))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::IssueType;

    fn request() -> ComplaintCreate {
        ComplaintCreate {
            state: " Karnataka ".into(),
            city: " Bengaluru".into(),
            issue_type: IssueType::Garbage,
            description: "  Garbage not collected for a week ".into(),
            media_url: Some("   ".into()),
            voice_note_url: None,
        }
    }

    #[test]
    fn test_submission_is_trimmed() {
        let req = validate_submission(request()).unwrap();
        assert_eq!(req.state, "Karnataka");
        assert_eq!(req.city, "Bengaluru");
        assert_eq!(req.description, "Garbage not collected for a week");
        assert_eq!(req.media_url, None);
    }

    #[test]
    fn test_city_required() {
        let mut req = request();
        req.city = "  ".into();
        let err = validate_submission(req).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "city is required");
    }

    #[test]
    fn test_unsupported_state() {
        let mut req = request();
        req.state = "Atlantis".into();
        assert_eq!(
            validate_submission(req).unwrap_err().code,
            ErrorCode::UnsupportedState
        );
    }

    #[test]
    fn test_voice_note_can_replace_description() {
        let mut req = request();
        req.description = String::new();
        assert_eq!(
            validate_submission(req.clone()).unwrap_err().code,
            ErrorCode::DescriptionRequired
        );

        req.voice_note_url = Some("https://media.example.org/complaints/1-ab.webm".into());
        let req = validate_submission(req).unwrap();
        assert!(req.description.is_empty());
    }

    #[test]
    fn test_media_url_must_be_http() {
        let mut req = request();
        req.media_url = Some("file:///etc/passwd".into());
        assert_eq!(
            validate_submission(req).unwrap_err().code,
            ErrorCode::InvalidFormat
        );
    }

    #[test]
    fn test_lang_query_defaults_to_english() {
        assert_eq!(LangQuery::default().language(), Language::En);
        let q = LangQuery {
            lang: Some("TE".into()),
        };
        assert_eq!(q.language(), Language::Te);
        let q = LangQuery {
            lang: Some("fr".into()),
        };
        assert_eq!(q.language(), Language::En);
    }
}
