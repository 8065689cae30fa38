pub mod auth;
pub mod eulogy;
pub mod gallery;
pub mod health;
pub mod tributes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tributes             list (GET ?page&limit), submit (POST)
/// /gallery              list images (GET)
/// /gallery/upload       upload photo (POST multipart)
/// /eulogy/proxy         proxy remote document (GET ?url=)
/// ```
///
/// The auth callback and health check live at the root, not under `/api` --
/// see [`auth::router`] and [`health::router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tributes", tributes::router())
        .nest("/gallery", gallery::router())
        .nest("/eulogy", eulogy::router())
}
