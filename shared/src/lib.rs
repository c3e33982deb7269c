//! Shared types for Nagar Rakshak
//!
//! Domain models, the complaint lifecycle, the status timeline
//! reconstructor, localized labels and the unified error system used by
//! the server and its clients.

pub mod error;
pub mod i18n;
pub mod models;
pub mod navigation;
pub mod timeline;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use i18n::Language;
pub use models::{Complaint, ComplaintStatus, IssueType, StatusUpdate};
pub use timeline::{StageMarker, StageTime, TimeFormat, Timeline, TimelineEntry};
