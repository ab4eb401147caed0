// ============================================================================
// Avatar Upload Route
// ============================================================================
//
// POST /upload - multipart field `avatar`, registered identity required.
//
// The uploaded bytes are bridged into a single client-streaming RPC to the
// storage backend (see `upload` for the chunk discipline) and the backend's
// terminal verdict becomes the HTTP result. No resume, no retry: a broken
// stream is a failed upload.
//
// ============================================================================

use axum::{
    extract::{Multipart, State},
    response::Response,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::context::AppContext;
use crate::cookies::CookieKind;
use crate::error::AppError;
use crate::identity::RegisteredIdentity;
use crate::routes::verdict_response;
use crate::upload::{chunk_requests, storage_filename};

const UPLOAD_FIELD: &str = "avatar";

/// POST /upload
pub async fn upload_avatar(
    State(ctx): State<Arc<AppContext>>,
    RegisteredIdentity(token): RegisteredIdentity,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            let original_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            file = Some((original_name, bytes.to_vec()));
            break;
        }
    }

    let (original_name, data) =
        file.ok_or_else(|| AppError::validation("Missing multipart field `avatar`"))?;
    if data.is_empty() {
        return Err(AppError::validation("Uploaded file is empty"));
    }

    let filename = storage_filename(&original_name, Utc::now());
    let requests = chunk_requests(&token, &filename, &data);

    tracing::debug!(
        filename = %filename,
        size = data.len(),
        chunks = requests.len(),
        "streaming upload to storage backend"
    );

    let verdict = ctx
        .clients
        .storage
        .storage()
        .upload_file(tokio_stream::iter(requests))
        .await?
        .into_inner();

    Ok(verdict_response(
        verdict.status,
        verdict.description,
        json!({}),
        Some(CookieKind::Registered),
    ))
}
