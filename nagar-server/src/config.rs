//! Server configuration

use crate::error::BoxError;

/// Where uploaded media is kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaBackend {
    /// Files under `MEDIA_DIR`, served at `/media`
    Local,
    /// Objects in `MEDIA_S3_BUCKET`
    S3,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for citizen sessions
    pub jwt_secret: String,
    /// Bearer token accepted on admin routes
    pub admin_token: String,
    pub media_backend: MediaBackend,
    /// Root directory for the local media backend
    pub media_dir: String,
    /// Base URL prepended to stored media keys
    pub media_public_base_url: String,
    pub media_s3_bucket: String,
    /// Image-analysis function endpoint (analysis disabled when unset)
    pub analysis_url: Option<String>,
    pub analysis_api_key: Option<String>,
    /// SMS gateway endpoint for OTP delivery (codes are logged when unset)
    pub sms_gateway_url: Option<String>,
    pub sms_api_key: Option<String>,
    /// Offset applied to timeline timestamps, in minutes east of UTC
    pub timeline_tz_offset_minutes: i32,
    /// `json` for structured log lines, anything else for plain text
    pub log_format: String,
    /// Directory for daily rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn optional(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|s| !s.trim().is_empty())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let media_backend = match std::env::var("MEDIA_BACKEND")
            .unwrap_or_else(|_| "local".into())
            .to_lowercase()
            .as_str()
        {
            "local" => MediaBackend::Local,
            "s3" => MediaBackend::S3,
            other => return Err(format!("MEDIA_BACKEND must be local or s3, got {other}").into()),
        };

        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let sms_gateway_url = Self::optional("SMS_GATEWAY_URL");
        if sms_gateway_url.is_none() && environment != "development" {
            return Err(format!("SMS_GATEWAY_URL must be set in {environment} environment").into());
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port,
            environment: environment.clone(),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            admin_token: Self::require_secret("ADMIN_TOKEN", &environment)?,
            media_backend,
            media_dir: std::env::var("MEDIA_DIR").unwrap_or_else(|_| "data/media".into()),
            media_public_base_url: std::env::var("MEDIA_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{http_port}/media")),
            media_s3_bucket: std::env::var("MEDIA_S3_BUCKET")
                .unwrap_or_else(|_| "nagar-complaint-media".into()),
            analysis_url: Self::optional("ANALYSIS_URL"),
            analysis_api_key: Self::optional("ANALYSIS_API_KEY"),
            sms_gateway_url,
            sms_api_key: Self::optional("SMS_API_KEY"),
            timeline_tz_offset_minutes: std::env::var("TIMELINE_TZ_OFFSET_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(shared::TimeFormat::IST_OFFSET_MINUTES),
            log_format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
            log_dir: Self::optional("LOG_DIR"),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
