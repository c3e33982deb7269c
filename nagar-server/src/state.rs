//! Application state

use std::sync::Arc;

use shared::TimeFormat;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::analysis::ImageAnalyzer;
use crate::auth::rate_limit::RateLimiter;
use crate::config::{Config, MediaBackend};
use crate::error::BoxError;
use crate::live::ComplaintFeed;
use crate::media::{LocalMediaStore, MediaStore, S3MediaStore};
use crate::sms::OtpSender;
use crate::source::PgComplaintSource;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Per-complaint change signals for live tracking
    pub feed: ComplaintFeed,
    /// Photo and voice-note storage
    pub media: Arc<dyn MediaStore>,
    /// Image-analysis client (`None` when `ANALYSIS_URL` is unset)
    pub analyzer: Option<ImageAnalyzer>,
    /// OTP delivery
    pub otp_sender: OtpSender,
    /// JWT secret for citizen sessions
    pub jwt_secret: String,
    /// Bearer token for admin routes
    pub admin_token: String,
    /// Timezone used when rendering timeline timestamps
    pub time_format: TimeFormat,
    /// Rate limiter for OTP and submission routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        let media: Arc<dyn MediaStore> = match config.media_backend {
            MediaBackend::Local => {
                tokio::fs::create_dir_all(&config.media_dir).await?;
                Arc::new(LocalMediaStore::new(
                    &config.media_dir,
                    &config.media_public_base_url,
                ))
            }
            MediaBackend::S3 => {
                let aws_config =
                    aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
                Arc::new(S3MediaStore::new(
                    aws_sdk_s3::Client::new(&aws_config),
                    &config.media_s3_bucket,
                    &config.media_public_base_url,
                ))
            }
        };

        let analyzer = match &config.analysis_url {
            Some(url) => Some(ImageAnalyzer::new(url, config.analysis_api_key.clone())?),
            None => {
                tracing::warn!("ANALYSIS_URL not set, image analysis disabled");
                None
            }
        };

        let otp_sender = match &config.sms_gateway_url {
            Some(url) => OtpSender::gateway(url, config.sms_api_key.clone())?,
            None => {
                tracing::warn!("SMS_GATEWAY_URL not set, OTP codes will be logged");
                OtpSender::Log
            }
        };

        Ok(Self {
            pool,
            feed: ComplaintFeed::new(),
            media,
            analyzer,
            otp_sender,
            jwt_secret: config.jwt_secret.clone(),
            admin_token: config.admin_token.clone(),
            time_format: TimeFormat::with_offset_minutes(config.timeline_tz_offset_minutes),
            rate_limiter: RateLimiter::new(),
        })
    }

    /// Complaint reads backed by the pool
    pub fn source(&self) -> PgComplaintSource {
        PgComplaintSource::new(self.pool.clone())
    }
}
