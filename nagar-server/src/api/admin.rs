//! POST /api/admin/complaints/{code}/status: record a lifecycle step

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{ComplaintStatus, StatusUpdate, StatusUpdateCreate};
use shared::util::{normalize_complaint_code, now_millis};

use super::ApiResult;
use super::body::AppJson;
use crate::db;
use crate::state::AppState;

/// Appends the update and moves the complaint in one transaction.
///
/// Live subscribers hear about the change from the database triggers once
/// the transaction commits.
pub async fn record_status(
    State(state): State<AppState>,
    Path(code): Path<String>,
    AppJson(req): AppJson<StatusUpdateCreate>,
) -> ApiResult<StatusUpdate> {
    let req = req.normalized();
    let code = normalize_complaint_code(&code);
    if code.is_empty() {
        return Err(AppError::required("complaint_code").into());
    }
    let now = now_millis();

    let mut tx = state.pool.begin().await?;
    let complaint = db::complaints::find_by_code_for_update(&mut *tx, &code)
        .await?
        .ok_or_else(|| AppError::complaint_not_found(&code))?;

    check_transition(complaint.status, req.status)?;

    let update = db::status_updates::append(&mut *tx, complaint.id, &req, now).await?;
    db::complaints::update_status(&mut *tx, complaint.id, req.status, now).await?;
    tx.commit().await?;

    tracing::info!(
        complaint_id = complaint.id,
        code = %code,
        from = %complaint.status,
        to = %req.status,
        assigned_to = ?req.assigned_to,
        "Complaint status recorded"
    );

    Ok(Json(update))
}

/// Only forward moves are accepted
fn check_transition(from: ComplaintStatus, to: ComplaintStatus) -> Result<(), AppError> {
    if from == to {
        return Err(
            AppError::new(ErrorCode::StatusAlreadyRecorded).with_detail("status", to.as_str())
        );
    }
    if !from.can_transition_to(to) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot move complaint from {from} to {to}"),
        )
        .with_detail("from", from.as_str())
        .with_detail("to", to.as_str()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComplaintStatus::*;

    #[test]
    fn test_forward_moves_are_accepted() {
        assert!(check_transition(Registered, Assigned).is_ok());
        assert!(check_transition(Assigned, InProgress).is_ok());
        assert!(check_transition(Registered, Resolved).is_ok());
    }

    #[test]
    fn test_reassignment_at_same_stage_is_rejected() {
        let err = check_transition(Assigned, Assigned).unwrap_err();
        assert_eq!(err.code, ErrorCode::StatusAlreadyRecorded);
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);
        assert_eq!(err.details.unwrap().get("status").unwrap(), "Assigned");
    }

    #[test]
    fn test_backward_move_is_rejected() {
        let err = check_transition(InProgress, Assigned).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        let details = err.details.unwrap();
        assert_eq!(details.get("from").unwrap(), "In-Progress");
        assert_eq!(details.get("to").unwrap(), "Assigned");
    }
}
