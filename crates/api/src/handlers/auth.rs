//! Sign-in callback.
//!
//! The identity provider redirects here with a one-time code; we hand the
//! code to the Data Service and bounce the visitor back to where they came
//! from. Session state itself lives entirely with the provider.

use axum::extract::{Query, State};
use axum::response::Redirect;
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub next: Option<String>,
}

/// Exchange an auth code for a session, then redirect.
///
/// On exchange failure the visitor lands on `/?error=auth_failed`. The
/// `next` target has any `#fragment` stripped -- scrolling is handled
/// client-side after the redirect.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    if let Some(code) = query.code.as_deref() {
        if let Err(err) = state.data.exchange_code(code).await {
            tracing::error!(error = %err, "Auth code exchange failed");
            return Redirect::to("/?error=auth_failed");
        }
    }

    Redirect::to(&sanitize_next(query.next.as_deref()))
}

/// Drop the fragment from a `next` target, defaulting to the home page.
fn sanitize_next(next: Option<&str>) -> String {
    let stripped = next
        .unwrap_or("/")
        .split('#')
        .next()
        .unwrap_or("");

    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
