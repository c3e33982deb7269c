//! Complaint tracking: look up a complaint and rebuild its timeline

use serde::Serialize;
use shared::error::AppError;
use shared::models::Complaint;
use shared::util::normalize_complaint_code;
use shared::{Language, TimeFormat, Timeline};

use crate::error::ServiceResult;
use crate::source::ComplaintSource;

/// What the tracking screen renders
#[derive(Debug, Clone, Serialize)]
pub struct TrackingView {
    pub complaint: Complaint,
    pub timeline: Timeline,
}

/// Fetch the complaint behind `raw_code` and rebuild its timeline.
///
/// Called once per request and again after every change signal; it holds
/// no state between calls.
pub async fn track<S>(
    source: &S,
    raw_code: &str,
    lang: Language,
    time_format: &TimeFormat,
) -> ServiceResult<TrackingView>
where
    S: ComplaintSource + ?Sized,
{
    let code = normalize_complaint_code(raw_code);
    if code.is_empty() {
        return Err(AppError::required("complaint_code").into());
    }

    let complaint = source
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::complaint_not_found(&code))?;
    let updates = source.status_updates(complaint.id).await?;
    let timeline = Timeline::build(complaint.status, &updates, lang, time_format);

    Ok(TrackingView {
        complaint,
        timeline,
    })
}
