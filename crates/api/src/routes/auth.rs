//! Route definitions for authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes mounted at the root.
///
/// ```text
/// GET /auth/callback?code&next   -> callback (code exchange + redirect)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/callback", get(auth::callback))
}
