//! Route definitions for the eulogy document proxy.

use axum::routing::get;
use axum::Router;

use crate::handlers::eulogy;
use crate::state::AppState;

/// Eulogy routes mounted at `/api/eulogy`.
///
/// ```text
/// GET /proxy?url=   -> proxy_document (https targets only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/proxy", get(eulogy::proxy_document))
}
