//! nagar-server: Nagar Rakshak civic complaint service
//!
//! Long-running service that:
//! - Registers complaints (with optional photo / voice note) from citizens
//! - Rebuilds each complaint's status timeline for tracking, live over WebSocket
//! - Accepts lifecycle updates from the municipal admin portal
//! - Signs citizens in with phone OTP

mod analysis;
mod api;
mod auth;
mod config;
mod db;
mod error;
mod live;
mod logger;
mod media;
mod sms;
mod source;
mod state;
mod tracking;

use std::net::SocketAddr;
use std::time::Duration;

use config::Config;
use error::BoxError;
use state::AppState;

/// Interval of the housekeeping task
const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logger::init_logger(&config);

    tracing::info!("Starting nagar-server (env: {})", config.environment);
    if config.is_development() {
        tracing::warn!("Development mode: default secrets in use, do not expose publicly");
    }

    let state = AppState::new(&config).await?;
    let app = api::create_router(state.clone(), &config);

    // Database change notifications → live tracking subscribers
    tokio::spawn(live::listener::run(state.pool.clone(), state.feed.clone()));

    // Periodic housekeeping: rate limiter, idle feed channels, expired OTPs
    let housekeeping = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MAINTENANCE_INTERVAL);
        loop {
            interval.tick().await;
            housekeeping.rate_limiter.cleanup().await;
            let pruned = housekeeping.feed.prune();
            match db::otp_verifications::delete_expired(
                &housekeeping.pool,
                shared::util::now_millis(),
            )
            .await
            {
                Ok(removed) => tracing::debug!(pruned, removed, "Housekeeping done"),
                Err(e) => tracing::warn!(error = %e, "Expired OTP cleanup failed"),
            }
        }
    });

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("nagar-server HTTP listening on {http_addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("nagar-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
