use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::envelope::{Envelope, CODE_BACKEND_FAILURE, CODE_VALIDATION};

pub type AppResult<T> = Result<T, AppError>;

/// Gateway error type.
///
/// Backend-*reported* failures (nonzero status in a reply) are not errors:
/// the handlers turn them into FAIL envelopes directly. This type covers what
/// goes wrong before or instead of a well-formed backend reply.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    /// The RPC itself failed: backend unreachable, deadline exceeded, broken
    /// stream. Never carries backend wording to the client.
    #[error("backend transport error: {0}")]
    Transport(#[from] tonic::Status),

    #[error("multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::Transport(status) => match status.code() {
                tonic::Code::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            },
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Envelope shown to the client. Transport details stay in the logs.
    fn envelope(&self) -> Envelope {
        match self {
            AppError::Validation(msg) => Envelope::fail(CODE_VALIDATION, msg.clone()),
            AppError::Multipart(_) => Envelope::fail(CODE_VALIDATION, "Malformed upload body"),
            AppError::Transport(_) => Envelope::fail(CODE_BACKEND_FAILURE, "Backend unavailable"),
            AppError::Config(_) => Envelope::fail(CODE_BACKEND_FAILURE, "Gateway misconfigured"),
        }
    }

    fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %self, status = %status.as_u16(), "request rejected");
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();
        (self.status_code(), Json(self.envelope())).into_response()
    }
}
