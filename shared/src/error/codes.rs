//! Unified error codes for Nagar Rakshak
//!
//! Error codes are shared by the server and the mobile client and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Complaint errors
//! - 4xxx: Media errors
//! - 5xxx: Image analysis errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Too many requests
    TooManyRequests = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Phone number is malformed
    InvalidPhoneNumber = 1101,
    /// No OTP pending for this phone
    OtpNotRequested = 1102,
    /// OTP has expired
    OtpExpired = 1103,
    /// OTP is invalid
    OtpInvalid = 1104,
    /// Too many OTP attempts
    TooManyAttempts = 1105,
    /// OTP delivery failed
    OtpDeliveryFailed = 1106,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin token required
    AdminRequired = 2003,

    // ==================== 3xxx: Complaint ====================
    /// Complaint not found
    ComplaintNotFound = 3001,
    /// Status transition moves backward in the lifecycle
    InvalidStatusTransition = 3002,
    /// Stored status is not a lifecycle stage
    UnknownStatus = 3003,
    /// Issue type is not supported
    UnknownIssueType = 3004,
    /// State/region is not supported
    UnsupportedState = 3005,
    /// Neither a description nor a voice note was provided
    DescriptionRequired = 3006,
    /// Could not allocate a unique complaint code
    ComplaintCodeExhausted = 3007,
    /// Complaint is already at the requested stage
    StatusAlreadyRecorded = 3008,

    // ==================== 4xxx: Media ====================
    /// File too large
    FileTooLarge = 4001,
    /// Unsupported file format
    UnsupportedFileFormat = 4002,
    /// Invalid/corrupted image file
    InvalidImageFile = 4003,
    /// No file provided in request
    NoFileProvided = 4004,
    /// Empty file provided
    EmptyFile = 4005,
    /// File storage failed
    FileStorageFailed = 4006,

    // ==================== 5xxx: Analysis ====================
    /// Image analysis call failed
    AnalysisFailed = 5001,
    /// Image analysis is not configured
    AnalysisUnavailable = 5002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Numeric value of this code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default English message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::TooManyRequests => "Too many requests, try again later",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::InvalidPhoneNumber => "Invalid phone number",
            ErrorCode::OtpNotRequested => "No OTP pending for this phone number",
            ErrorCode::OtpExpired => "OTP has expired",
            ErrorCode::OtpInvalid => "Invalid OTP",
            ErrorCode::TooManyAttempts => "Too many attempts, request a new OTP",
            ErrorCode::OtpDeliveryFailed => "Failed to send OTP",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator token is required",

            // Complaint
            ErrorCode::ComplaintNotFound => {
                "Complaint not found, please check the complaint ID and try again"
            }
            ErrorCode::InvalidStatusTransition => "Complaint status cannot move backward",
            ErrorCode::UnknownStatus => "Complaint has an unknown status",
            ErrorCode::UnknownIssueType => "Unknown issue type",
            ErrorCode::UnsupportedState => "Unsupported state",
            ErrorCode::DescriptionRequired => "A description or a voice note is required",
            ErrorCode::ComplaintCodeExhausted => "Could not allocate a complaint ID",
            ErrorCode::StatusAlreadyRecorded => "Complaint is already at this stage",

            // Media
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::FileStorageFailed => "File storage failed",

            // Analysis
            ErrorCode::AnalysisFailed => "Could not analyze the image",
            ErrorCode::AnalysisUnavailable => "Image analysis is not available",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::TooManyRequests),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1101 => Ok(ErrorCode::InvalidPhoneNumber),
            1102 => Ok(ErrorCode::OtpNotRequested),
            1103 => Ok(ErrorCode::OtpExpired),
            1104 => Ok(ErrorCode::OtpInvalid),
            1105 => Ok(ErrorCode::TooManyAttempts),
            1106 => Ok(ErrorCode::OtpDeliveryFailed),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Complaint
            3001 => Ok(ErrorCode::ComplaintNotFound),
            3002 => Ok(ErrorCode::InvalidStatusTransition),
            3003 => Ok(ErrorCode::UnknownStatus),
            3004 => Ok(ErrorCode::UnknownIssueType),
            3005 => Ok(ErrorCode::UnsupportedState),
            3006 => Ok(ErrorCode::DescriptionRequired),
            3007 => Ok(ErrorCode::ComplaintCodeExhausted),
            3008 => Ok(ErrorCode::StatusAlreadyRecorded),

            // Media
            4001 => Ok(ErrorCode::FileTooLarge),
            4002 => Ok(ErrorCode::UnsupportedFileFormat),
            4003 => Ok(ErrorCode::InvalidImageFile),
            4004 => Ok(ErrorCode::NoFileProvided),
            4005 => Ok(ErrorCode::EmptyFile),
            4006 => Ok(ErrorCode::FileStorageFailed),

            // Analysis
            5001 => Ok(ErrorCode::AnalysisFailed),
            5002 => Ok(ErrorCode::AnalysisUnavailable),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::OtpExpired.code(), 1103);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);
        assert_eq!(ErrorCode::ComplaintNotFound.code(), 3001);
        assert_eq!(ErrorCode::InvalidStatusTransition.code(), 3002);
        assert_eq!(ErrorCode::FileTooLarge.code(), 4001);
        assert_eq!(ErrorCode::AnalysisFailed.code(), 5001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_roundtrips_every_known_code() {
        for code in [
            ErrorCode::Success,
            ErrorCode::TooManyRequests,
            ErrorCode::OtpDeliveryFailed,
            ErrorCode::UnknownStatus,
            ErrorCode::ComplaintCodeExhausted,
            ErrorCode::StatusAlreadyRecorded,
            ErrorCode::FileStorageFailed,
            ErrorCode::AnalysisUnavailable,
            ErrorCode::ConfigError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(7777), Err(InvalidErrorCode(7777)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::ComplaintNotFound).unwrap();
        assert_eq!(json, "3001");
        let code: ErrorCode = serde_json::from_str("1104").unwrap();
        assert_eq!(code, ErrorCode::OtpInvalid);
    }
}
