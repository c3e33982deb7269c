//! Read access to complaints and their status history
//!
//! The tracking service only needs these two lookups, so they sit behind a
//! trait; handlers use the PostgreSQL implementation and tests an in-memory one.

use async_trait::async_trait;
use shared::models::{Complaint, StatusUpdate};
use sqlx::PgPool;

use crate::db;
use crate::error::ServiceResult;

#[async_trait]
pub trait ComplaintSource: Send + Sync {
    /// Look up a complaint by its normalized code
    async fn find_by_code(&self, code: &str) -> ServiceResult<Option<Complaint>>;

    /// Status updates of a complaint, ascending by `created_at`
    async fn status_updates(&self, complaint_id: i64) -> ServiceResult<Vec<StatusUpdate>>;
}

#[derive(Clone)]
pub struct PgComplaintSource {
    pool: PgPool,
}

impl PgComplaintSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComplaintSource for PgComplaintSource {
    async fn find_by_code(&self, code: &str) -> ServiceResult<Option<Complaint>> {
        db::complaints::find_by_code(&self.pool, code).await
    }

    async fn status_updates(&self, complaint_id: i64) -> ServiceResult<Vec<StatusUpdate>> {
        db::status_updates::list_for_complaint(&self.pool, complaint_id).await
    }
}
