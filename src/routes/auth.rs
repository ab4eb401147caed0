// ============================================================================
// Authentication Routes
// ============================================================================
//
// Endpoints:
// - POST /login - Password login, installs the registered cookie
// - GET /logout - Clears the registered cookie
// - GET /check_signin - Validates the registered token against the backend
// - POST /send_code - Mail a one-time code to a nickname
// - POST /confirm_code - Confirm the code, installs the anonymous cookie
//
// ============================================================================

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::context::AppContext;
use crate::cookies::{self, CookieKind};
use crate::envelope::Envelope;
use crate::error::AppError;
use crate::identity::RegisteredIdentity;
use crate::proto::services::v1 as proto;
use crate::routes::verdict_response;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login
///
/// Empty credentials are rejected locally; the backend is only consulted with
/// a complete pair. A zero backend status carries the fresh permanent token,
/// which is installed as the registered cookie.
pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(AppError::validation("Username and password are required"));
    }

    let verdict = ctx
        .clients
        .auth
        .auth()
        .login(proto::LoginRequest {
            username: request.username,
            password: request.password,
        })
        .await?
        .into_inner();

    if verdict.status != 0 {
        return Ok(verdict_response(verdict.status, verdict.description, json!({}), None));
    }

    tracing::info!("login succeeded, installing registered cookie");
    let mut response = (StatusCode::OK, Json(Envelope::success_empty())).into_response();
    cookies::append_to(
        &mut response,
        cookies::install(CookieKind::Registered, &verdict.token),
    );
    Ok(response)
}

/// GET /logout
/// Clears the registered cookie. Purely a gateway-side state change; the
/// permanent token itself stays valid until the backend expires it.
pub async fn logout(RegisteredIdentity(_token): RegisteredIdentity) -> Response {
    let mut response = (StatusCode::OK, Json(Envelope::success_empty())).into_response();
    cookies::append_to(&mut response, cookies::clear(CookieKind::Registered));
    response
}

/// GET /check_signin
pub async fn check_signin(
    State(ctx): State<Arc<AppContext>>,
    RegisteredIdentity(token): RegisteredIdentity,
) -> Result<Response, AppError> {
    let verdict = ctx
        .clients
        .auth
        .auth()
        .check_signin(proto::TokenRequest { token })
        .await?
        .into_inner();

    Ok(verdict_response(
        verdict.status,
        verdict.description,
        json!({}),
        Some(CookieKind::Registered),
    ))
}

#[derive(Debug, Deserialize)]
pub struct SendCodeRequest {
    #[serde(default)]
    pub nickname: String,
}

/// POST /send_code
pub async fn send_code(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<SendCodeRequest>,
) -> Result<Response, AppError> {
    if request.nickname.is_empty() {
        return Err(AppError::validation("Nickname is required"));
    }

    let verdict = ctx
        .clients
        .auth
        .auth()
        .send_code(proto::SendCodeRequest {
            nickname: request.nickname,
        })
        .await?
        .into_inner();

    Ok(verdict_response(verdict.status, verdict.description, json!({}), None))
}

#[derive(Debug, Deserialize)]
pub struct ConfirmCodeRequest {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub code: String,
}

/// POST /confirm_code
///
/// A zero backend status carries a fresh temporary token, installed as the
/// anonymous cookie. The caller can vote and register candidacy with it
/// without a full account.
pub async fn confirm_code(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<ConfirmCodeRequest>,
) -> Result<Response, AppError> {
    if request.nickname.is_empty() || request.code.is_empty() {
        return Err(AppError::validation("Nickname and code are required"));
    }

    let verdict = ctx
        .clients
        .auth
        .auth()
        .confirm_code(proto::ConfirmCodeRequest {
            nickname: request.nickname,
            code: request.code,
        })
        .await?
        .into_inner();

    if verdict.status != 0 {
        return Ok(verdict_response(verdict.status, verdict.description, json!({}), None));
    }

    tracing::info!("mail code confirmed, installing anonymous cookie");
    let mut response = (StatusCode::OK, Json(Envelope::success_empty())).into_response();
    cookies::append_to(
        &mut response,
        cookies::install(CookieKind::Anonymous, &verdict.token),
    );
    Ok(response)
}
