//! The opaque-collaborator boundary.
//!
//! Everything the site needs from the hosted provider fits in a handful of
//! request/response operations. Handlers depend on this trait, never on the
//! concrete HTTP client, so integration tests can run against an in-memory
//! implementation.

use async_trait::async_trait;

use crate::error::DataError;
use crate::models::{AuthUser, GalleryImage, NewGalleryImage, NewTribute, Session, Tribute};

#[async_trait]
pub trait DataService: Send + Sync {
    /// Resolve the user behind an access token. `None` means the token is
    /// absent, expired, or otherwise not a session -- the caller proceeds
    /// anonymously.
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, DataError>;

    /// Exchange a sign-in code for a session.
    async fn exchange_code(&self, code: &str) -> Result<Session, DataError>;

    /// Insert one tribute row, returning it with provider-assigned fields.
    async fn insert_tribute(&self, new: &NewTribute) -> Result<Tribute, DataError>;

    /// One page of tributes ordered by `created_at` descending, plus the
    /// total row count.
    async fn list_tributes(&self, limit: u64, offset: u64)
        -> Result<(Vec<Tribute>, u64), DataError>;

    /// Insert one gallery image row.
    async fn insert_gallery_image(
        &self,
        new: &NewGalleryImage,
    ) -> Result<GalleryImage, DataError>;

    /// All gallery images ordered by `created_at` descending.
    async fn list_gallery_images(&self) -> Result<Vec<GalleryImage>, DataError>;

    /// Upload photo bytes to the object store and return the public URL.
    async fn upload_photo(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DataError>;
}
