//! Static reference data for the client forms and helpline screen

use axum::Json;
use serde::Serialize;
use shared::models::{
    HelplineGroup, IssueCategory, IssueType, SUPPORTED_STATES, helpline_directory,
};

#[derive(Debug, Serialize)]
pub struct IssueTypeInfo {
    pub value: IssueType,
    pub label: &'static str,
    pub category: IssueCategory,
}

/// GET /api/helplines
pub async fn helplines() -> Json<Vec<HelplineGroup>> {
    Json(helpline_directory())
}

/// GET /api/issue-types
pub async fn issue_types() -> Json<Vec<IssueTypeInfo>> {
    Json(
        IssueType::ALL
            .into_iter()
            .map(|value| IssueTypeInfo {
                value,
                label: value.label(),
                category: value.category(),
            })
            .collect(),
    )
}

/// GET /api/states
pub async fn states() -> Json<&'static [&'static str]> {
    Json(SUPPORTED_STATES)
}
