//! Complaint model and its lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A lifecycle stage of a complaint
///
/// Stages are totally ordered; a complaint only ever moves forward through
/// `Registered -> Assigned -> In-Progress -> Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Registered,
    Assigned,
    #[serde(rename = "In-Progress")]
    InProgress,
    Resolved,
}

/// A status string that is not one of the four lifecycle stages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown complaint status: {0:?}")]
pub struct UnknownStatus(pub String);

impl ComplaintStatus {
    /// Every stage in lifecycle order
    pub const ALL: [ComplaintStatus; 4] = [
        ComplaintStatus::Registered,
        ComplaintStatus::Assigned,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
    ];

    /// Position of this stage in [`ComplaintStatus::ALL`]
    pub const fn index(self) -> usize {
        match self {
            ComplaintStatus::Registered => 0,
            ComplaintStatus::Assigned => 1,
            ComplaintStatus::InProgress => 2,
            ComplaintStatus::Resolved => 3,
        }
    }

    /// Wire/database representation
    pub const fn as_str(self) -> &'static str {
        match self {
            ComplaintStatus::Registered => "Registered",
            ComplaintStatus::Assigned => "Assigned",
            ComplaintStatus::InProgress => "In-Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }

    /// Parse the exact wire representation
    pub fn parse(s: &str) -> Result<Self, UnknownStatus> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }

    /// Whether a complaint at `self` may record `next`
    ///
    /// Only strictly forward moves are recorded. The timeline shows the
    /// first row per stage, so a repeated stage would never be visible.
    pub fn can_transition_to(self, next: ComplaintStatus) -> bool {
        next.index() > self.index()
    }

    pub fn is_resolved(self) -> bool {
        self == ComplaintStatus::Resolved
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Kind of civic issue being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Streetlight,
    Pothole,
    Garbage,
    Drainage,
    Water,
    Electricity,
    Noise,
    Others,
}

/// Department-level grouping of issue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    Infrastructure,
    Roads,
    Sanitation,
    Water,
    Utilities,
    Environment,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown issue type: {0:?}")]
pub struct UnknownIssueType(pub String);

impl IssueType {
    pub const ALL: [IssueType; 8] = [
        IssueType::Streetlight,
        IssueType::Pothole,
        IssueType::Garbage,
        IssueType::Drainage,
        IssueType::Water,
        IssueType::Electricity,
        IssueType::Noise,
        IssueType::Others,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            IssueType::Streetlight => "streetlight",
            IssueType::Pothole => "pothole",
            IssueType::Garbage => "garbage",
            IssueType::Drainage => "drainage",
            IssueType::Water => "water",
            IssueType::Electricity => "electricity",
            IssueType::Noise => "noise",
            IssueType::Others => "others",
        }
    }

    pub fn parse(s: &str) -> Result<Self, UnknownIssueType> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| UnknownIssueType(s.to_string()))
    }

    /// Label shown in the issue picker
    pub const fn label(self) -> &'static str {
        match self {
            IssueType::Streetlight => "Street Light Issues",
            IssueType::Pothole => "Pothole/Road Damage",
            IssueType::Garbage => "Garbage Collection",
            IssueType::Drainage => "Drainage Problems",
            IssueType::Water => "Water Supply Issues",
            IssueType::Electricity => "Power Outage",
            IssueType::Noise => "Noise Pollution",
            IssueType::Others => "Other Issues",
        }
    }

    pub const fn category(self) -> IssueCategory {
        match self {
            IssueType::Streetlight => IssueCategory::Infrastructure,
            IssueType::Pothole => IssueCategory::Roads,
            IssueType::Garbage => IssueCategory::Sanitation,
            IssueType::Drainage | IssueType::Water => IssueCategory::Water,
            IssueType::Electricity => IssueCategory::Utilities,
            IssueType::Noise => IssueCategory::Environment,
            IssueType::Others => IssueCategory::General,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// States/regions accepted on the registration form
pub const SUPPORTED_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Karnataka",
    "Maharashtra",
    "Tamil Nadu",
    "Gujarat",
    "Rajasthan",
    "West Bengal",
    "Delhi",
    "Others",
];

pub fn is_supported_state(state: &str) -> bool {
    SUPPORTED_STATES.contains(&state)
}

/// Complaint record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: i64,
    /// Human-readable code handed to the citizen, e.g. `NGR123456`
    pub complaint_code: String,
    pub issue_type: IssueType,
    pub description: String,
    pub state: String,
    pub city: String,
    pub media_url: Option<String>,
    pub voice_note_url: Option<String>,
    pub status: ComplaintStatus,
    pub citizen_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Submit complaint payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintCreate {
    pub state: String,
    pub city: String,
    pub issue_type: IssueType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub voice_note_url: Option<String>,
}

/// Submit complaint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintReceipt {
    pub complaint_code: String,
    pub status: ComplaintStatus,
    pub created_at: i64,
}
