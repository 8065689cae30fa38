//! Route definitions for the tribute guestbook.

use axum::routing::get;
use axum::Router;

use crate::handlers::tributes;
use crate::state::AppState;

/// Tribute routes mounted at `/api/tributes`.
///
/// ```text
/// GET  /   -> list_tributes
/// POST /   -> submit_tribute
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(tributes::list_tributes).post(tributes::submit_tribute),
    )
}
