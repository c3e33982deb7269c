//! Status update events

use serde::{Deserialize, Serialize};

use super::ComplaintStatus;

/// Append-only record of a complaint entering a lifecycle stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub id: i64,
    pub complaint_id: i64,
    pub status: ComplaintStatus,
    /// Name of the authority the complaint was assigned to
    pub assigned_to: Option<String>,
    /// Phone number or other contact for the authority
    pub assigned_contact: Option<String>,
    pub note: Option<String>,
    pub created_at: i64,
}

/// Record status update payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateCreate {
    pub status: ComplaintStatus,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub assigned_contact: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl StatusUpdateCreate {
    /// Trim optional text fields, dropping the ones left empty
    pub fn normalized(self) -> Self {
        fn clean(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            status: self.status,
            assigned_to: clean(self.assigned_to),
            assigned_contact: clean(self.assigned_contact),
            note: clean(self.note),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_drops_blank_fields() {
        let create = StatusUpdateCreate {
            status: ComplaintStatus::Assigned,
            assigned_to: Some("  Ward 12 Engineer ".into()),
            assigned_contact: Some("   ".into()),
            note: None,
        }
        .normalized();
        assert_eq!(create.assigned_to.as_deref(), Some("Ward 12 Engineer"));
        assert_eq!(create.assigned_contact, None);
        assert_eq!(create.note, None);
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let create: StatusUpdateCreate =
            serde_json::from_str(r#"{"status":"In-Progress"}"#).unwrap();
        assert_eq!(create.status, ComplaintStatus::InProgress);
        assert!(create.assigned_to.is_none());
    }
}
