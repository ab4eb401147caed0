// ============================================================================
// Cookie Lifecycle
// ============================================================================
//
// The gateway owns exactly two cookies, one per identity scheme. Both are set
// with `SameSite=None; Secure` unconditionally (the web client lives on a
// different origin). Clearing is logical deletion: the cookie is rewritten
// with an empty value and zero max-age, never a separate tombstone.
//
// This module only writes cookies; reading them is the identity resolver's
// job (see `identity`).
//
// ============================================================================

use axum::http::{header::SET_COOKIE, HeaderValue};
use axum::response::Response;

pub const REGISTERED_COOKIE: &str = "registered-token";
pub const ANONYMOUS_COOKIE: &str = "anonymous-token";

/// Which of the two session cookies to mutate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CookieKind {
    Anonymous,
    Registered,
}

impl CookieKind {
    pub fn name(self) -> &'static str {
        match self {
            CookieKind::Anonymous => ANONYMOUS_COOKIE,
            CookieKind::Registered => REGISTERED_COOKIE,
        }
    }
}

/// `Set-Cookie` value installing a fresh token.
pub fn install(kind: CookieKind, token: &str) -> HeaderValue {
    let cookie = format!("{}={}; SameSite=None; Secure; Path=/", kind.name(), token);
    match HeaderValue::from_str(&cookie) {
        Ok(value) => value,
        Err(_) => {
            // Backend handed out a token that is not a valid header value.
            // Refuse to install it rather than emit a mangled header.
            tracing::warn!(cookie = kind.name(), "backend token not header-safe, clearing cookie");
            clear(kind)
        }
    }
}

/// `Set-Cookie` value clearing the cookie.
pub fn clear(kind: CookieKind) -> HeaderValue {
    let cookie = format!("{}=; Max-Age=0; SameSite=None; Secure; Path=/", kind.name());
    HeaderValue::from_str(&cookie).expect("static cookie attributes are valid")
}

/// Appends a `Set-Cookie` header to an already-built response.
pub fn append_to(response: &mut Response, value: HeaderValue) {
    response.headers_mut().append(SET_COOKIE, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_sets_fixed_attributes() {
        let value = install(CookieKind::Registered, "abc");
        assert_eq!(
            value.to_str().unwrap(),
            "registered-token=abc; SameSite=None; Secure; Path=/"
        );
    }

    #[test]
    fn clear_empties_the_value() {
        let value = clear(CookieKind::Anonymous);
        assert_eq!(
            value.to_str().unwrap(),
            "anonymous-token=; Max-Age=0; SameSite=None; Secure; Path=/"
        );
    }
}
