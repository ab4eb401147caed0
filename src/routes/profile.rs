// ============================================================================
// Profile Routes
// ============================================================================
//
// Endpoints:
// - GET /get_user_data - Profile read plus avatar URL composition
// - GET /check_uuid - Token validity probe, legacy `{status: 0|1}` shape
//
// ============================================================================

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::context::AppContext;
use crate::cookies::{self, CookieKind};
use crate::envelope::{Envelope, BACKEND_TOKEN_EXPIRED};
use crate::error::AppError;
use crate::identity::{MaybeIdentity, RegisteredIdentity};
use crate::proto::services::v1 as proto;
use crate::routes::{identity_cookie_kind, verdict_response};

/// GET /get_user_data
///
/// Two strictly ordered backend calls: the profile read, then - only when it
/// succeeded - the avatar lookup. The avatar URL is composed from the public
/// storage base, the identity token and the stored filename; accounts without
/// an avatar get the fixed fallback URL.
pub async fn get_user_data(
    State(ctx): State<Arc<AppContext>>,
    RegisteredIdentity(token): RegisteredIdentity,
) -> Result<Response, AppError> {
    let profile = ctx
        .clients
        .user
        .user()
        .get_profile(proto::ProfileRequest {
            token: token.clone(),
        })
        .await?
        .into_inner();

    if profile.status != 0 {
        return Ok(verdict_response(
            profile.status,
            profile.description,
            json!({}),
            Some(CookieKind::Registered),
        ));
    }

    let avatar = ctx
        .clients
        .user
        .user()
        .get_avatar(proto::ProfileRequest {
            token: token.clone(),
        })
        .await?
        .into_inner();

    let avatar_url = if avatar.status == 0 && !avatar.filename.is_empty() {
        format!("{}/{}/{}", ctx.config.avatar_base_url, token, avatar.filename)
    } else {
        ctx.config.avatar_fallback_url.clone()
    };

    let user = profile.user.unwrap_or_default();
    let data = json!({
        "id": user.id,
        "login": user.login,
        "name": user.name,
        "email": user.email,
        "avatar_url": avatar_url,
    });

    Ok((StatusCode::OK, Json(Envelope::success(data))).into_response())
}

/// GET /check_uuid
///
/// Legacy probe used by the web client on page load. Answers `{"status": 1}`
/// when the active token (either scheme) is still valid, `{"status": 0}`
/// otherwise - including when no cookie is present at all. Not the envelope
/// shape. An expired token additionally clears its cookie.
pub async fn check_uuid(
    State(ctx): State<Arc<AppContext>>,
    MaybeIdentity(identity): MaybeIdentity,
) -> Result<Response, AppError> {
    let identity = match identity {
        Some(identity) => identity,
        None => return Ok(Json(json!({ "status": 0 })).into_response()),
    };

    let verdict = ctx
        .clients
        .auth
        .auth()
        .check_uuid(proto::TokenRequest {
            token: identity.token().to_string(),
        })
        .await?
        .into_inner();

    if verdict.status == 0 {
        return Ok(Json(json!({ "status": 1 })).into_response());
    }

    let mut response = Json(json!({ "status": 0 })).into_response();
    if verdict.status == BACKEND_TOKEN_EXPIRED {
        cookies::append_to(
            &mut response,
            cookies::clear(identity_cookie_kind(&identity)),
        );
    }
    Ok(response)
}
