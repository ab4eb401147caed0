// ============================================================================
// HTTP Routes
// ============================================================================
//
// Route handlers grouped by capability:
// - auth.rs: login, logout, signin check, mail-code issuance/confirmation
// - profile.rs: profile read, token check
// - election.rs: election state, candidacy, voting, statistics
// - upload.rs: avatar upload (multipart -> storage stream)
// - health.rs: liveness probe
// - middleware.rs: request logging
//
// Failure convention (uniform across routes): local validation -> 400,
// missing identity -> 401, backend-reported failure -> 401 with the backend
// description verbatim, expired token (backend status 13) -> 200 FAIL plus a
// cookie clear, transport failure -> 502/504 with no internal detail.
//
// ============================================================================

mod auth;
mod election;
mod health;
mod middleware;
mod profile;
mod upload;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::context::AppContext;
use crate::cookies::{self, CookieKind};
use crate::envelope::{Envelope, BACKEND_TOKEN_EXPIRED, CODE_BACKEND_FAILURE};
use crate::identity::Identity;

/// Create the gateway router with all routes.
pub fn create_router(ctx: Arc<AppContext>) -> Router {
    let cors = cors_layer(&ctx.config.allowed_origins);
    let max_upload_bytes = ctx.config.max_upload_bytes;

    Router::new()
        // Liveness (no identity, no backend)
        .route("/health", get(health::health_check))
        // Authentication and session lifecycle
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/check_signin", get(auth::check_signin))
        .route("/send_code", post(auth::send_code))
        .route("/confirm_code", post(auth::confirm_code))
        // Profile
        .route("/get_user_data", get(profile::get_user_data))
        .route("/check_uuid", get(profile::check_uuid))
        // Election
        .route("/check_election", get(election::check_election))
        .route("/candidates", get(election::candidates))
        .route("/register_candidate", post(election::register_candidate))
        .route("/check_register", get(election::check_register))
        .route("/vote", post(election::vote))
        .route("/my_voice", get(election::my_voice))
        .route("/vote_statistic", get(election::vote_statistic))
        // Avatar upload
        .route("/upload", post(upload::upload_avatar))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        // Apply middleware (order matters - last added runs first)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(cors)
                .into_inner(),
        )
        .with_state(ctx)
}

/// Credentialed CORS for the web client: exact origins from configuration,
/// cookies allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub(crate) fn identity_cookie_kind(identity: &Identity) -> CookieKind {
    match identity {
        Identity::Anonymous(_) => CookieKind::Anonymous,
        Identity::Registered(_) => CookieKind::Registered,
    }
}

/// Turns a well-formed backend verdict into the HTTP response.
///
/// Status 0 wraps `data` in the success envelope. The expiry sentinel, on
/// routes that carry an identity, answers 200 with a FAIL envelope and clears
/// the cookie that held the dead token. Any other nonzero status answers 401
/// with the backend description passed through verbatim.
pub(crate) fn verdict_response(
    status: i32,
    description: String,
    data: Value,
    cookie: Option<CookieKind>,
) -> Response {
    if status == 0 {
        return (StatusCode::OK, Json(Envelope::success(data))).into_response();
    }

    if status == BACKEND_TOKEN_EXPIRED {
        if let Some(kind) = cookie {
            tracing::info!(cookie = kind.name(), "backend reported expired token, clearing cookie");
            let mut response =
                (StatusCode::OK, Json(Envelope::token_expired())).into_response();
            cookies::append_to(&mut response, cookies::clear(kind));
            return response;
        }
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(Envelope::fail(CODE_BACKEND_FAILURE, description)),
    )
        .into_response()
}
