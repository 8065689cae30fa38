//! Row models and insert DTOs for the Data Service tables.
//!
//! Field names match the provider's JSON exactly; rows are passed through
//! to API responses unmodified.

use serde::{Deserialize, Serialize};

use keepsake_core::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Tributes
// ---------------------------------------------------------------------------

/// A row from the `tributes` table. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tribute {
    pub id: RecordId,
    pub user_id: Option<RecordId>,
    pub name: String,
    pub email: Option<String>,
    pub message: String,
    pub photo_url: Option<String>,
    pub tribute_photo_url: Option<String>,
    pub is_anonymous: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a new tribute. `id` and `created_at` are assigned by
/// the Data Service.
#[derive(Debug, Clone, Serialize)]
pub struct NewTribute {
    pub user_id: Option<RecordId>,
    pub name: String,
    pub email: Option<String>,
    pub message: String,
    pub photo_url: Option<String>,
    pub tribute_photo_url: Option<String>,
    pub is_anonymous: bool,
}

// ---------------------------------------------------------------------------
// Gallery images
// ---------------------------------------------------------------------------

/// A row from the `gallery_images` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: RecordId,
    pub storage_path: String,
    pub public_url: String,
    pub alt_text: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new gallery image record.
#[derive(Debug, Clone, Serialize)]
pub struct NewGalleryImage {
    pub storage_path: String,
    pub public_url: String,
    pub alt_text: String,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// The currently authenticated user, as reported by the Data Service.
/// Never persisted locally -- only read to prefill tribute author fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: RecordId,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Profile fields the identity provider may or may not populate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub picture: Option<String>,
}

/// A session minted by exchanging an auth code.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}
