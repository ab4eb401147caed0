// ============================================================================
// Response Envelope
// ============================================================================
//
// Every route (except /check_uuid, which keeps its legacy shape) answers with
// the same JSON envelope:
//
//   { "status": "Success" | "FAIL",
//     "status_code": <int>,
//     "description": <string>,
//     "data": <object> }
//
// `status_code` is the *gateway* axis: 0 on success, a small fixed code
// otherwise. Domain state reported by a backend (e.g. whether the election is
// open) travels inside `data` and never flips the envelope to FAIL.
//
// ============================================================================

use serde::Serialize;
use serde_json::{Map, Value};

/// Gateway status code: backend reported a nonzero status.
pub const CODE_BACKEND_FAILURE: i32 = 1;
/// Gateway status code: request failed local validation.
pub const CODE_VALIDATION: i32 = 2;
/// Gateway status code: no usable identity cookie on the request.
pub const CODE_NO_IDENTITY: i32 = 3;

/// Backend sentinel: the identity token behind the call has expired. Routes
/// that see it clear the corresponding cookie.
pub const BACKEND_TOKEN_EXPIRED: i32 = 13;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "Success")]
    Success,
    #[serde(rename = "FAIL")]
    Fail,
}

#[derive(Clone, Debug, Serialize)]
pub struct Envelope {
    pub status: Status,
    pub status_code: i32,
    pub description: String,
    pub data: Value,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Envelope {
            status: Status::Success,
            status_code: 0,
            description: "Success".to_string(),
            data,
        }
    }

    pub fn success_empty() -> Self {
        Self::success(Value::Object(Map::new()))
    }

    /// Failure envelope. The description is passed through verbatim; the
    /// gateway never rewrites backend wording.
    pub fn fail(status_code: i32, description: impl Into<String>) -> Self {
        Envelope {
            status: Status::Fail,
            status_code,
            description: description.into(),
            data: Value::Object(Map::new()),
        }
    }

    /// Normalizes a unary backend verdict: status 0 becomes the fixed success
    /// envelope around `data`, anything else a FAIL carrying the backend's
    /// own description.
    pub fn from_backend(status: i32, description: &str, data: Value) -> Self {
        if status == 0 {
            Self::success(data)
        } else {
            Self::fail(CODE_BACKEND_FAILURE, description)
        }
    }

    pub fn no_identity() -> Self {
        Self::fail(CODE_NO_IDENTITY, "Not authorized")
    }

    pub fn token_expired() -> Self {
        Self::fail(CODE_BACKEND_FAILURE, "Token expired, sign in again")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_has_zero_code() {
        let env = Envelope::success(json!({"election_status": 1}));
        assert_eq!(env.status, Status::Success);
        assert_eq!(env.status_code, 0);
        assert_eq!(env.description, "Success");
        assert_eq!(env.data["election_status"], 1);
    }

    #[test]
    fn backend_failure_keeps_description_verbatim() {
        let env = Envelope::from_backend(7, "нет такого пользователя", json!({}));
        assert_eq!(env.status, Status::Fail);
        assert_eq!(env.status_code, CODE_BACKEND_FAILURE);
        assert_eq!(env.description, "нет такого пользователя");
    }

    #[test]
    fn data_defaults_to_empty_object() {
        let env = Envelope::fail(CODE_VALIDATION, "missing field");
        assert_eq!(env.data, json!({}));
    }

    #[test]
    fn serializes_with_legacy_status_strings() {
        let ok = serde_json::to_value(Envelope::success_empty()).unwrap();
        assert_eq!(ok["status"], "Success");
        let fail = serde_json::to_value(Envelope::fail(1, "x")).unwrap();
        assert_eq!(fail["status"], "FAIL");
    }
}
