//! Media endpoints
//!
//! POST /api/media          multipart `kind` (photo | voice) + `file` → public URL
//! POST /api/media/analyze  base64 photo + issue type → relevance verdict

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::util::now_millis;

use super::ApiResult;
use super::body::AppJson;
use crate::analysis::{AnalysisVerdict, AnalyzeRequest, normalize_image_data};
use crate::media::{self, MediaKind};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MediaUploadResponse {
    pub url: String,
    pub key: String,
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
}

/// POST /api/media
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<MediaUploadResponse> {
    let mut kind: Option<MediaKind> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("kind") => {
                let text = field.text().await.map_err(multipart_error)?;
                kind = Some(MediaKind::parse(&text).ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::InvalidRequest,
                        format!("Unknown media kind: {text}"),
                    )
                })?);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?.to_vec();
                file = Some((filename, data));
            }
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| AppError::required("kind"))?;
    let (filename, data) = file.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;

    let validated = media::validate(kind, &filename, &data)?;
    let key = media::media_key(&data, &validated.ext, now_millis());
    let size = data.len();

    let url = state
        .media
        .put(&key, data, validated.content_type)
        .await
        .map_err(|e| {
            tracing::error!(key = %key, error = %e, "Media upload failed");
            AppError::new(ErrorCode::FileStorageFailed)
        })?;

    tracing::info!(key = %key, kind = ?kind, size, "Complaint media stored");

    Ok(Json(MediaUploadResponse { url, key }))
}

/// POST /api/media/analyze
pub async fn analyze(
    State(state): State<AppState>,
    AppJson(req): AppJson<AnalyzeRequest>,
) -> ApiResult<AnalysisVerdict> {
    let analyzer = state
        .analyzer
        .as_ref()
        .ok_or_else(|| AppError::new(ErrorCode::AnalysisUnavailable))?;

    let image_data = normalize_image_data(&req.image_data)?;
    let verdict = analyzer.analyze(image_data, req.issue_type).await?;

    tracing::info!(
        issue_type = %req.issue_type,
        is_relevant = verdict.is_relevant,
        "Image analyzed"
    );

    Ok(Json(verdict))
}
