//! Handlers for the photo gallery: listing and multipart upload.

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use keepsake_core::gallery;
use keepsake_core::types::RecordId;
use keepsake_data::models::NewGalleryImage;

use crate::error::{AppError, AppResult};
use crate::extract::OptionalUser;
use crate::state::AppState;

/// Alt text for records missing one.
const DEFAULT_ALT_TEXT: &str = "Gallery photo";

// ---------------------------------------------------------------------------
// GET /api/gallery
// ---------------------------------------------------------------------------

/// One gallery entry as the page consumes it.
#[derive(Debug, Serialize)]
pub struct GalleryEntry {
    pub id: RecordId,
    pub src: String,
    pub alt: String,
    pub public_url: String,
}

#[derive(Debug, Serialize)]
pub struct GalleryListResponse {
    pub images: Vec<GalleryEntry>,
}

/// List gallery images, newest first.
///
/// Always answers 200. A Data Service failure is logged and reported as an
/// empty list -- the page falls back to its built-in photos either way, so
/// callers never need to distinguish the two.
pub async fn list_gallery(State(state): State<AppState>) -> Json<GalleryListResponse> {
    let images = match state.data.list_gallery_images().await {
        Ok(rows) => rows
            .into_iter()
            .map(|row| GalleryEntry {
                id: row.id,
                src: row.public_url.clone(),
                alt: row.alt_text.unwrap_or_else(|| DEFAULT_ALT_TEXT.to_string()),
                public_url: row.public_url,
            })
            .collect(),
        Err(err) => {
            tracing::warn!(error = %err, "Gallery listing failed; returning empty set");
            Vec::new()
        }
    };

    Json(GalleryListResponse { images })
}

// ---------------------------------------------------------------------------
// POST /api/gallery/upload
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub path: String,
    pub url: String,
    pub id: Option<RecordId>,
}

/// Upload one photo to the gallery.
///
/// Validates the declared content type and size, stores the bytes in the
/// photo bucket under a collision-resistant key, then records the image.
/// A failed record insert after a successful upload still counts as
/// success; the orphaned object is logged and left in place.
pub async fn upload_photo(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        file = Some((filename, content_type, bytes.to_vec()));
        break;
    }

    let Some((filename, content_type, bytes)) = file else {
        return Err(AppError::BadRequest("No file provided".to_string()));
    };

    gallery::validate_upload(&content_type, bytes.len() as u64)?;

    let actor = user
        .as_ref()
        .map(|u| u.id.to_string())
        .unwrap_or_else(|| gallery::ANONYMOUS_ACTOR.to_string());
    let path = gallery::storage_key(&actor, &filename, chrono::Utc::now());

    let url = state
        .data
        .upload_photo(&path, &content_type, bytes)
        .await
        .map_err(|e| AppError::persistence("Failed to upload file", e))?;

    // The photo is already in the bucket; a failed record insert leaves an
    // orphaned object rather than failing the whole upload.
    let id = match state
        .data
        .insert_gallery_image(&NewGalleryImage {
            storage_path: path.clone(),
            public_url: url.clone(),
            alt_text: filename,
        })
        .await
    {
        Ok(row) => Some(row.id),
        Err(err) => {
            tracing::warn!(error = %err, path = %path, "Gallery record insert failed after upload");
            None
        }
    };

    tracing::info!(path = %path, actor = %actor, "Gallery photo uploaded");

    Ok(Json(UploadResponse {
        success: true,
        path,
        url,
        id,
    }))
}
