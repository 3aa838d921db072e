//! Base64 encoding of captured images
//!
//! The response carries the raw base64 of the PNG on disk, with no
//! `data:` prefix.

use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::{CaptureError, CaptureResult};

/// Encodes bytes as standard, padded base64
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Reads `path` and returns its contents as raw base64.
///
/// # Errors
///
/// Returns [`CaptureError::ReadImage`] if the file cannot be read.
pub async fn encode_file_base64(path: &Path) -> CaptureResult<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CaptureError::ReadImage {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(encode_base64(&bytes))
}
