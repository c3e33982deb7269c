//! Data models
//!
//! Shared between the server and the mobile client (via API).
//! All IDs are `i64` (PostgreSQL BIGSERIAL); timestamps are Unix millis.

pub mod citizen;
pub mod complaint;
pub mod helpline;
pub mod status_update;

// Re-exports
pub use citizen::*;
pub use complaint::*;
pub use helpline::*;
pub use status_update::*;
