// ============================================================================
// Session Identity
// ============================================================================
//
// Two parallel identity schemes ride on two cookies:
// - `registered-token`: permanent token of a fully registered account
// - `anonymous-token`: temporary token minted through a mail code
//
// A request carries at most one *active* identity. When both cookies are
// present the registered one wins; the choice is made here, once, so the
// handlers can pattern-match on the sum type instead of sniffing cookies.
//
// ============================================================================

use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::cookies::{ANONYMOUS_COOKIE, REGISTERED_COOKIE};
use crate::envelope::Envelope;

/// The caller's session identity, resolved from request cookies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    /// Temporary token issued on mail-code confirmation.
    Anonymous(String),
    /// Permanent token issued on login.
    Registered(String),
}

impl Identity {
    /// Resolves the active identity. Registered takes precedence when both
    /// cookies are set; empty cookie values count as absent.
    pub fn from_headers(headers: &HeaderMap) -> Option<Identity> {
        if let Some(token) = cookie_value(headers, REGISTERED_COOKIE) {
            return Some(Identity::Registered(token));
        }
        cookie_value(headers, ANONYMOUS_COOKIE).map(Identity::Anonymous)
    }

    pub fn token(&self) -> &str {
        match self {
            Identity::Anonymous(token) | Identity::Registered(token) => token,
        }
    }
}

/// Reads a single cookie value off the `Cookie` header. Empty values are
/// treated as absent because clearing a cookie sets it to "".
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(COOKIE).and_then(|v| v.to_str().ok())?;
    for cookie in cookies.split(';') {
        if let Some(value) = cookie.trim().strip_prefix(name).and_then(|rest| rest.strip_prefix('=')) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

fn no_identity_response() -> Response {
    (StatusCode::UNAUTHORIZED, Json(Envelope::no_identity())).into_response()
}

/// Extractor for routes open to either identity. Never rejects.
#[derive(Clone, Debug)]
pub struct MaybeIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(Identity::from_headers(&parts.headers)))
    }
}

/// Extractor for routes that accept either identity but require one.
/// Rejects with the fixed "no identity" envelope before any backend call.
#[derive(Clone, Debug)]
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match Identity::from_headers(&parts.headers) {
            Some(identity) => Ok(RequiredIdentity(identity)),
            None => {
                tracing::debug!("request to identity-gated route without identity cookies");
                Err(no_identity_response())
            }
        }
    }
}

/// Extractor for routes gated on the registered identity specifically.
/// An anonymous cookie alone does not satisfy it.
#[derive(Clone, Debug)]
pub struct RegisteredIdentity(pub String);

impl<S> FromRequestParts<S> for RegisteredIdentity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match Identity::from_headers(&parts.headers) {
            Some(Identity::Registered(token)) => Ok(RegisteredIdentity(token)),
            _ => {
                tracing::debug!("request to registered-only route without registered cookie");
                Err(no_identity_response())
            }
        }
    }
}
