//! Gallery upload validation and storage-key generation.
//!
//! The same MIME/size rules run on the server (authoritative) and in the
//! visitor client (fast feedback before any bytes leave the machine).

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum accepted upload size: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Content types accepted for gallery photos.
pub const ACCEPTED_CONTENT_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Actor identifier used in storage keys for unauthenticated uploads.
pub const ANONYMOUS_ACTOR: &str = "anonymous";

/// Extension used when the original filename has none.
const DEFAULT_EXTENSION: &str = "bin";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an upload's declared content type and size.
pub fn validate_upload(content_type: &str, size_bytes: u64) -> Result<(), CoreError> {
    if !ACCEPTED_CONTENT_TYPES.contains(&content_type) {
        return Err(CoreError::Validation(
            "Invalid file type. Only JPEG, PNG, and WebP are allowed.".to_string(),
        ));
    }

    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(
            "File size too large. Maximum size is 10MB.".to_string(),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

/// Build a collision-resistant object key for an uploaded photo.
///
/// The key is `{actor}-{unix_millis}-{suffix}.{ext}`: the uploader's id (or
/// [`ANONYMOUS_ACTOR`]), the upload time, a random suffix so two uploads in
/// the same millisecond never collide, and the original file extension.
pub fn storage_key(actor: &str, original_filename: &str, now: Timestamp) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}.{}",
        actor,
        now.timestamp_millis(),
        &suffix[..8],
        file_extension(original_filename),
    )
}

/// Extract a sanitized, lowercase extension from a filename.
///
/// Anything other than ASCII alphanumerics is stripped; a missing or empty
/// extension falls back to a fixed default.
pub fn file_extension(filename: &str) -> String {
    let ext: String = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect();

    if ext.is_empty() {
        DEFAULT_EXTENSION.to_string()
    } else {
        ext
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
