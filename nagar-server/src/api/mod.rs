//! API routes for nagar-server

pub mod admin;
pub mod auth;
pub mod body;
pub mod complaint;
pub mod health;
pub mod live;
pub mod media;
pub mod reference;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::admin_auth::admin_auth_middleware;
use crate::auth::citizen_auth::citizen_auth_middleware;
use crate::auth::rate_limit::{otp_send_rate_limit, otp_verify_rate_limit, submit_rate_limit};
use crate::config::{Config, MediaBackend};
use crate::error::ServiceError;
use crate::state::AppState;

pub type ApiResult<T> = Result<Json<T>, ServiceError>;

/// Upload limit plus room for multipart framing / base64 expansion
const MEDIA_BODY_LIMIT: usize = crate::media::MAX_FILE_SIZE * 4 / 3 + 64 * 1024;

/// Create the combined router
pub fn create_router(state: AppState, config: &Config) -> Router {
    // Public tracking
    let tracking = Router::new()
        .route("/api/complaints/{code}", get(complaint::track))
        .route("/api/complaints/{code}/live", get(live::track_live));

    // Submission and uploads (rate limited, citizen token optional)
    let submission = Router::new()
        .route("/api/complaints", post(complaint::submit))
        .route("/api/media", post(media::upload))
        .layer(DefaultBodyLimit::max(MEDIA_BODY_LIMIT))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            submit_rate_limit,
        ));

    let analysis = Router::new()
        .route("/api/media/analyze", post(media::analyze))
        .layer(DefaultBodyLimit::max(MEDIA_BODY_LIMIT));

    // Phone OTP sign-in
    let otp_send = Router::new()
        .route("/api/auth/otp/send", post(auth::send_otp))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            otp_send_rate_limit,
        ));
    let otp_verify = Router::new()
        .route("/api/auth/otp/verify", post(auth::verify_otp))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            otp_verify_rate_limit,
        ));

    // Signed-in citizen
    let citizen = Router::new()
        .route("/api/me", get(auth::me))
        .route("/api/me/complaints", get(complaint::my_complaints))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            citizen_auth_middleware,
        ));

    // Admin portal
    let admin = Router::new()
        .route(
            "/api/admin/complaints/{code}/status",
            post(admin::record_status),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    let reference = Router::new()
        .route("/api/helplines", get(reference::helplines))
        .route("/api/issue-types", get(reference::issue_types))
        .route("/api/states", get(reference::states));

    let mut app = Router::new()
        .route("/health", get(health::health_check))
        .merge(tracking)
        .merge(submission)
        .merge(analysis)
        .merge(otp_send)
        .merge(otp_verify)
        .merge(citizen)
        .merge(admin)
        .merge(reference);

    if config.media_backend == MediaBackend::Local {
        app = app.nest_service("/media", ServeDir::new(&config.media_dir));
    }

    app.layer(
        ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        ),
    )
    .with_state(state)
}
