// ============================================================================
// Upload Stream Bridge
// ============================================================================
//
// Turns one uploaded file into one client-streaming RPC: a sequence of fixed
// 1024-byte chunk messages, each carrying the owning identity token and the
// server-assigned storage filename, followed by the backend's single terminal
// verdict.
//
// The storage filename is derived as `{unix_timestamp}.{ext}` with the
// extension lower-cased, or the bare timestamp when the original name has no
// extension. Nothing else of the client-supplied name survives, which rules
// out path traversal and collisions in one move.
//
// ============================================================================

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::proto::services::v1::UploadFileRequest;

/// Fixed chunk size of the outbound stream. A shorter final chunk is still
/// transmitted; end-of-stream is end of input, never chunk length.
pub const UPLOAD_CHUNK_SIZE: usize = 1024;

/// Server-assigned storage name for an uploaded file.
pub fn storage_filename(original: &str, now: DateTime<Utc>) -> String {
    let timestamp = now.timestamp();
    match Path::new(original).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", timestamp, ext.to_lowercase()),
        _ => timestamp.to_string(),
    }
}

/// Splits the file into outbound stream messages. `ceil(len / 1024)` messages
/// for a non-empty file; every message repeats the token and filename so the
/// backend can treat each as self-describing.
pub fn chunk_requests(token: &str, filename: &str, data: &[u8]) -> Vec<UploadFileRequest> {
    data.chunks(UPLOAD_CHUNK_SIZE)
        .map(|piece| UploadFileRequest {
            token: token.to_string(),
            filename: filename.to_string(),
            chunk: piece.to_vec(),
        })
        .collect()
}
