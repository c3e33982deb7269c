//! Status timeline reconstruction
//!
//! Turns a complaint's current status plus its sparse, unordered list of
//! [`StatusUpdate`] rows into a fixed four-entry display timeline:
//!
//! ```text
//! current = In-Progress, updates = [Registered@t0, In-Progress@t2]
//!
//!   Registered   completed  t0
//!   Assigned     completed  "Processing..."   (no row yet)
//!   In Progress  completed  t2
//!   Resolved     upcoming   ""
//! ```
//!
//! Completion is decided only by the current status; rows contribute
//! timestamps and authority details. The function is pure and total, so
//! callers rebuild it from scratch on every change notification.

use chrono::{FixedOffset, Offset, TimeZone, Utc};
use serde::Serialize;

use crate::i18n::{Language, processing_label, stage_label};
use crate::models::{ComplaintStatus, StatusUpdate, UnknownStatus};

/// How recorded timestamps are rendered for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFormat {
    offset: FixedOffset,
}

impl TimeFormat {
    /// India Standard Time (UTC+05:30)
    pub const IST_OFFSET_MINUTES: i32 = 330;

    /// Build from a UTC offset in minutes; out-of-range offsets fall back to UTC
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { offset }
    }

    pub fn format(&self, millis: i64) -> String {
        match self.offset.timestamp_millis_opt(millis).single() {
            Some(dt) => dt.format("%d/%m/%Y, %-I:%M:%S %P").to_string(),
            None => String::new(),
        }
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self::with_offset_minutes(Self::IST_OFFSET_MINUTES)
    }
}

/// Timestamp state of a timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "at", rename_all = "snake_case")]
pub enum StageTime {
    /// A status update row exists; its creation time in Unix millis
    Recorded(i64),
    /// Stage is completed but no row has arrived yet
    Pending,
    /// Stage not reached
    NotReached,
}

/// Visual marker of a timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageMarker {
    Completed,
    /// First stage that is not completed (pulsing indicator)
    Active,
    Upcoming,
}

/// One lifecycle stage as shown to the citizen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub stage: ComplaintStatus,
    pub label: String,
    pub time: StageTime,
    /// `time` rendered for display; empty when the stage is not reached
    pub timestamp: String,
    pub completed: bool,
    pub authority: Option<String>,
    pub contact: Option<String>,
    pub note: Option<String>,
}

/// Authority currently handling a complaint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignedAuthority {
    pub name: String,
    pub contact: Option<String>,
}

/// The reconstructed four-stage timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub current: ComplaintStatus,
    pub entries: Vec<TimelineEntry>,
    pub assigned_authority: Option<AssignedAuthority>,
}

/// Updates sorted by the matching rule: earliest `created_at`, then lowest id
fn in_match_order(updates: &[StatusUpdate]) -> Vec<&StatusUpdate> {
    let mut ordered: Vec<&StatusUpdate> = updates.iter().collect();
    ordered.sort_by_key(|u| (u.created_at, u.id));
    ordered
}

impl Timeline {
    /// Rebuild the timeline for a complaint currently at `current`
    pub fn build(
        current: ComplaintStatus,
        updates: &[StatusUpdate],
        lang: Language,
        time_format: &TimeFormat,
    ) -> Self {
        let ordered = in_match_order(updates);
        let current_index = current.index();

        let entries = ComplaintStatus::ALL
            .into_iter()
            .map(|stage| {
                let completed = stage.index() <= current_index;
                let matched = ordered.iter().find(|u| u.status == stage);

                let time = match matched {
                    Some(update) => StageTime::Recorded(update.created_at),
                    None if completed => StageTime::Pending,
                    None => StageTime::NotReached,
                };
                let timestamp = match time {
                    StageTime::Recorded(millis) => time_format.format(millis),
                    StageTime::Pending => processing_label(lang).to_string(),
                    StageTime::NotReached => String::new(),
                };

                TimelineEntry {
                    stage,
                    label: stage_label(lang, stage).to_string(),
                    time,
                    timestamp,
                    completed,
                    authority: matched.and_then(|u| u.assigned_to.clone()),
                    contact: matched.and_then(|u| u.assigned_contact.clone()),
                    note: matched.and_then(|u| u.note.clone()),
                }
            })
            .collect();

        let assigned_authority = if current.is_resolved() {
            None
        } else {
            ordered
                .iter()
                .find_map(|u| u.assigned_to.clone())
                .map(|name| AssignedAuthority {
                    name,
                    contact: ordered.iter().find_map(|u| u.assigned_contact.clone()),
                })
        };

        Self {
            current,
            entries,
            assigned_authority,
        }
    }

    /// Rebuild from an unparsed status string
    ///
    /// A status outside the lifecycle is a data-integrity problem and is
    /// reported rather than rendered as an all-incomplete timeline.
    pub fn build_from_raw(
        current: &str,
        updates: &[StatusUpdate],
        lang: Language,
        time_format: &TimeFormat,
    ) -> Result<Self, UnknownStatus> {
        let status = ComplaintStatus::parse(current)?;
        Ok(Self::build(status, updates, lang, time_format))
    }

    /// Index of the first entry that is not completed
    pub fn active_index(&self) -> Option<usize> {
        self.entries.iter().position(|e| !e.completed)
    }

    pub fn marker(&self, index: usize) -> StageMarker {
        match self.entries.get(index) {
            Some(entry) if entry.completed => StageMarker::Completed,
            _ if self.active_index() == Some(index) => StageMarker::Active,
            _ => StageMarker::Upcoming,
        }
    }

    pub fn markers(&self) -> Vec<StageMarker> {
        (0..self.entries.len()).map(|i| self.marker(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComplaintStatus::*;

    const T0: i64 = 1_760_000_000_000;

    fn update(id: i64, status: ComplaintStatus, created_at: i64) -> StatusUpdate {
        StatusUpdate {
            id,
            complaint_id: 7,
            status,
            assigned_to: None,
            assigned_contact: None,
            note: None,
            created_at,
        }
    }

    fn assigned(id: i64, created_at: i64, name: &str, contact: &str) -> StatusUpdate {
        StatusUpdate {
            assigned_to: Some(name.to_string()),
            assigned_contact: Some(contact.to_string()),
            ..update(id, Assigned, created_at)
        }
    }

    fn build(current: ComplaintStatus, updates: &[StatusUpdate]) -> Timeline {
        Timeline::build(current, updates, Language::En, &TimeFormat::default())
    }

    fn stages(t: &Timeline) -> Vec<ComplaintStatus> {
        t.entries.iter().map(|e| e.stage).collect()
    }

    #[test]
    fn test_always_four_entries_in_fixed_order() {
        let shuffled = vec![
            update(4, Resolved, T0 + 3000),
            update(2, Assigned, T0 + 1000),
            update(1, Registered, T0),
            update(3, InProgress, T0 + 2000),
        ];
        for current in ComplaintStatus::ALL {
            let t = build(current, &shuffled);
            assert_eq!(stages(&t), ComplaintStatus::ALL.to_vec());
            let empty = build(current, &[]);
            assert_eq!(stages(&empty), ComplaintStatus::ALL.to_vec());
        }
    }

    #[test]
    fn test_completed_flags_are_a_monotonic_prefix() {
        for current in ComplaintStatus::ALL {
            let t = build(current, &[update(1, Resolved, T0)]);
            let flags: Vec<bool> = t.entries.iter().map(|e| e.completed).collect();
            let first_false = flags.iter().position(|c| !c).unwrap_or(flags.len());
            assert!(flags[..first_false].iter().all(|c| *c));
            assert!(flags[first_false..].iter().all(|c| !*c));
            assert_eq!(first_false, current.index() + 1);
        }
    }

    #[test]
    fn test_registered_without_updates() {
        let t = build(Registered, &[]);
        assert!(t.entries[0].completed);
        assert_eq!(t.entries[0].time, StageTime::Pending);
        assert_eq!(t.entries[0].timestamp, "Processing...");
        for entry in &t.entries[1..] {
            assert!(!entry.completed);
            assert_eq!(entry.time, StageTime::NotReached);
            assert_eq!(entry.timestamp, "");
        }
    }

    #[test]
    fn test_resolved_with_all_updates() {
        let mut updates = vec![
            update(1, Registered, T0),
            assigned(2, T0 + 60_000, "Ward 12 Engineer", "+919876543210"),
            update(3, InProgress, T0 + 120_000),
            update(4, Resolved, T0 + 180_000),
        ];
        updates[3].note = Some("Pothole filled".into());

        let t = build(Resolved, &updates);
        assert!(t.entries.iter().all(|e| e.completed));
        for (entry, u) in t.entries.iter().zip(&updates) {
            assert_eq!(entry.time, StageTime::Recorded(u.created_at));
            assert_eq!(entry.timestamp, TimeFormat::default().format(u.created_at));
        }
        assert_eq!(t.entries[1].authority.as_deref(), Some("Ward 12 Engineer"));
        assert_eq!(t.entries[1].contact.as_deref(), Some("+919876543210"));
        assert_eq!(t.entries[3].note.as_deref(), Some("Pothole filled"));
        assert_eq!(t.entries[0].authority, None);
        // call card is hidden once resolved
        assert_eq!(t.assigned_authority, None);
        assert_eq!(t.active_index(), None);
    }

    #[test]
    fn test_completed_stage_without_row_is_pending() {
        let t = build(InProgress, &[update(1, Registered, T0), update(3, InProgress, T0 + 5)]);
        assert_eq!(t.entries[1].time, StageTime::Pending);
        assert!(t.entries[1].completed);
        assert_eq!(t.entries[2].time, StageTime::Recorded(T0 + 5));
        assert_eq!(t.entries[3].time, StageTime::NotReached);
    }

    #[test]
    fn test_row_ahead_of_current_status_is_shown_but_not_completed() {
        // Row arrived before the complaint status was bumped
        let t = build(Registered, &[update(1, Assigned, T0)]);
        assert!(!t.entries[1].completed);
        assert_eq!(t.entries[1].time, StageTime::Recorded(T0));
    }

    #[test]
    fn test_duplicate_stage_uses_earliest_row_regardless_of_input_order() {
        let first = assigned(10, T0 + 1000, "Sanitation Dept", "1800-425-5369");
        let later = assigned(11, T0 + 9000, "Zonal Office", "1800-000-0000");

        let a = build(Assigned, &[first.clone(), later.clone()]);
        let b = build(Assigned, &[later, first]);
        assert_eq!(a, b);
        assert_eq!(a.entries[1].authority.as_deref(), Some("Sanitation Dept"));
        assert_eq!(a.entries[1].time, StageTime::Recorded(T0 + 1000));
    }

    #[test]
    fn test_duplicate_tie_on_timestamp_breaks_by_id() {
        let low = assigned(3, T0, "Low Id", "1");
        let high = assigned(9, T0, "High Id", "2");
        let t = build(Assigned, &[high, low]);
        assert_eq!(t.entries[1].authority.as_deref(), Some("Low Id"));
    }

    #[test]
    fn test_second_assignment_row_does_not_replace_the_first() {
        let pwd = assigned(1, 1000, "PWD", "080-1111");
        let water = assigned(2, 2000, "Water Board", "080-2222");

        let t = build(Assigned, &[water, pwd]);
        assert_eq!(t.entries[1].authority.as_deref(), Some("PWD"));
        assert_eq!(
            t.assigned_authority,
            Some(AssignedAuthority {
                name: "PWD".into(),
                contact: Some("080-1111".into()),
            })
        );
    }

    #[test]
    fn test_idempotent() {
        let updates = vec![
            update(1, Registered, T0),
            assigned(2, T0 + 10, "Water Board", "1800-425-1234"),
        ];
        let a = build(Assigned, &updates);
        let b = build(Assigned, &updates);
        assert_eq!(a, b);
    }

    #[test]
    fn test_active_marker_is_first_incomplete_stage() {
        let t = build(Assigned, &[]);
        assert_eq!(t.active_index(), Some(2));
        assert_eq!(
            t.markers(),
            vec![
                StageMarker::Completed,
                StageMarker::Completed,
                StageMarker::Active,
                StageMarker::Upcoming,
            ]
        );
    }

    #[test]
    fn test_assigned_authority_card() {
        let mut no_contact = update(2, Assigned, T0 + 10);
        no_contact.assigned_to = Some("PWD".into());
        let mut contact_only = update(3, InProgress, T0 + 20);
        contact_only.assigned_contact = Some("080-2222".into());

        let t = build(InProgress, &[contact_only, no_contact]);
        assert_eq!(
            t.assigned_authority,
            Some(AssignedAuthority {
                name: "PWD".into(),
                contact: Some("080-2222".into()),
            })
        );
        assert_eq!(build(InProgress, &[update(1, Registered, T0)]).assigned_authority, None);
    }

    #[test]
    fn test_labels_follow_language() {
        let t = Timeline::build(Registered, &[], Language::Hi, &TimeFormat::default());
        assert_eq!(t.entries[0].label, "पंजीकृत");
        assert_eq!(t.entries[0].timestamp, processing_label(Language::Hi));
        assert_eq!(t.entries[2].label, "प्रगति में");
    }

    // Open question from the original behaviour: an unknown current status
    // used to render every stage as incomplete. It is now an error.
    #[test]
    fn test_unknown_raw_status_is_reported() {
        let err = Timeline::build_from_raw("Closed", &[], Language::En, &TimeFormat::default())
            .unwrap_err();
        assert_eq!(err, UnknownStatus("Closed".into()));

        let ok = Timeline::build_from_raw("In-Progress", &[], Language::En, &TimeFormat::default())
            .unwrap();
        assert_eq!(ok.current, InProgress);
    }

    #[test]
    fn test_time_format_uses_offset() {
        // 2025-10-09T08:53:20Z
        let ist = TimeFormat::default().format(T0);
        assert_eq!(ist, "09/10/2025, 2:23:20 pm");
        let utc = TimeFormat::with_offset_minutes(0).format(T0);
        assert_eq!(utc, "09/10/2025, 8:53:20 am");
    }

    #[test]
    fn test_serialized_shape() {
        let t = build(Registered, &[update(1, Registered, T0)]);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["current"], "Registered");
        assert_eq!(json["entries"][0]["time"]["kind"], "recorded");
        assert_eq!(json["entries"][0]["time"]["at"], T0);
        assert_eq!(json["entries"][1]["time"]["kind"], "not_reached");
    }
}
