//! Database access layer

pub mod citizens;
pub mod complaints;
pub mod otp_verifications;
pub mod status_updates;
