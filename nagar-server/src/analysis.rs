//! Image relevance check against the hosted analysis function
//!
//! The client sends a base64 photo and the selected issue type; the
//! function answers whether the photo shows that kind of problem.

use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::IssueType;

use crate::media::MAX_FILE_SIZE;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Analyze request as accepted by the API
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64 image, optionally as a `data:` URL
    pub image_data: String,
    pub issue_type: IssueType,
}

/// Body sent upstream
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamRequest<'a> {
    image_data: &'a str,
    issue_type: IssueType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisVerdict {
    #[serde(alias = "isRelevant")]
    pub is_relevant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Strip a `data:<mime>;base64,` prefix and check the payload decodes
/// to a non-empty image no larger than the upload limit.
pub fn normalize_image_data(raw: &str) -> Result<&str, AppError> {
    let payload = match raw.split_once(',') {
        Some((header, body)) if header.starts_with("data:") => body,
        _ => raw,
    }
    .trim();

    if payload.is_empty() {
        return Err(AppError::required("image_data"));
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("image_data is not base64: {e}"))
        })?;
    if bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!("Image too large: {} bytes (max {MAX_FILE_SIZE})", bytes.len()),
        ));
    }
    Ok(payload)
}

#[derive(Clone)]
pub struct ImageAnalyzer {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl ImageAnalyzer {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }

    pub async fn analyze(
        &self,
        image_data: &str,
        issue_type: IssueType,
    ) -> Result<AnalysisVerdict, AppError> {
        let mut request = self.client.post(&self.url).json(&UpstreamRequest {
            image_data,
            issue_type,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Image analysis request failed");
            AppError::with_message(ErrorCode::AnalysisFailed, "Image analysis request failed")
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "Image analysis returned an error");
            return Err(AppError::with_message(
                ErrorCode::AnalysisFailed,
                format!("Image analysis failed with status {status}"),
            ));
        }

        response.json::<AnalysisVerdict>().await.map_err(|e| {
            tracing::warn!(error = %e, "Image analysis response could not be parsed");
            AppError::with_message(ErrorCode::AnalysisFailed, "Unexpected image analysis response")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_accepts_both_spellings() {
        let snake: AnalysisVerdict =
            serde_json::from_str(r#"{"is_relevant": true, "description": "Broken lamp"}"#).unwrap();
        assert!(snake.is_relevant);
        assert_eq!(snake.description.as_deref(), Some("Broken lamp"));

        let camel: AnalysisVerdict =
            serde_json::from_str(r#"{"isRelevant": false, "reason": "Photo shows a cat"}"#)
                .unwrap();
        assert!(!camel.is_relevant);
        assert_eq!(camel.reason.as_deref(), Some("Photo shows a cat"));
    }

    #[test]
    fn test_verdict_omits_empty_fields() {
        let verdict = AnalysisVerdict {
            is_relevant: true,
            description: None,
            reason: None,
        };
        assert_eq!(
            serde_json::to_value(&verdict).unwrap(),
            serde_json::json!({"is_relevant": true})
        );
    }

    #[test]
    fn test_upstream_body_shape() {
        let body = serde_json::to_value(UpstreamRequest {
            image_data: "aGVsbG8=",
            issue_type: IssueType::Garbage,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"imageData": "aGVsbG8=", "issueType": "garbage"})
        );
    }

    #[test]
    fn test_normalize_strips_data_url() {
        assert_eq!(
            normalize_image_data("data:image/png;base64,aGVsbG8=").unwrap(),
            "aGVsbG8="
        );
        assert_eq!(normalize_image_data("aGVsbG8=").unwrap(), "aGVsbG8=");
    }

    #[test]
    fn test_normalize_rejects_bad_payloads() {
        assert_eq!(
            normalize_image_data("data:image/png;base64,").unwrap_err().code,
            ErrorCode::RequiredField
        );
        assert_eq!(
            normalize_image_data("%%%not base64%%%").unwrap_err().code,
            ErrorCode::InvalidFormat
        );
    }
}
