//! Route definitions for the photo gallery.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use keepsake_core::gallery::MAX_UPLOAD_BYTES;

use crate::handlers::gallery;
use crate::state::AppState;

/// Gallery routes mounted at `/api/gallery`.
///
/// ```text
/// GET  /         -> list_gallery
/// POST /upload   -> upload_photo (multipart)
/// ```
///
/// The upload route carries a body limit slightly above the 10 MiB photo
/// cap so oversized files reach the handler's own validation (and its 400)
/// instead of a bare 413 from the extractor.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list_gallery))
        .route(
            "/upload",
            post(gallery::upload_photo)
                .layer(DefaultBodyLimit::max((MAX_UPLOAD_BYTES as usize) + 1024 * 1024)),
        )
}
