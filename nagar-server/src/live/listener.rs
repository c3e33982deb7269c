//! Bridges PostgreSQL `NOTIFY complaint_changes` into the [`ComplaintFeed`]
//!
//! Triggers on `complaints` and `complaint_status_updates` emit the payload,
//! so changes made outside this process (admin tooling, manual SQL) reach
//! live subscribers as well.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgListener;

use super::{ComplaintChange, ComplaintFeed};

pub const CHANGE_CHANNEL: &str = "complaint_changes";

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Parse `"<kind>:<complaint_id>"`
pub fn parse_notification(payload: &str) -> Option<(i64, ComplaintChange)> {
    let (kind, id) = payload.split_once(':')?;
    let change = match kind {
        "complaint" => ComplaintChange::Complaint,
        "status_update" => ComplaintChange::StatusUpdate,
        _ => return None,
    };
    let complaint_id = id.trim().parse().ok()?;
    Some((complaint_id, change))
}

/// Forward notifications until the process exits, reconnecting on failure
pub async fn run(pool: PgPool, feed: ComplaintFeed) {
    loop {
        match listen(&pool, &feed).await {
            Ok(()) => tracing::warn!("Change listener stream ended, reconnecting"),
            Err(e) => tracing::warn!(error = %e, "Change listener failed, reconnecting"),
        }
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

async fn listen(pool: &PgPool, feed: &ComplaintFeed) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(CHANGE_CHANNEL).await?;
    tracing::info!(channel = CHANGE_CHANNEL, "Listening for complaint changes");

    loop {
        let notification = listener.recv().await?;
        match parse_notification(notification.payload()) {
            Some((complaint_id, change)) => {
                let reached = feed.publish(complaint_id, change);
                tracing::debug!(complaint_id, ?change, reached, "Complaint change published");
            }
            None => {
                tracing::warn!(payload = notification.payload(), "Unrecognised change notification");
            }
        }
    }
}
