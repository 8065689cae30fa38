//! Same-origin proxy for the eulogy PDF.
//!
//! The document is hosted elsewhere; browsers will not embed a cross-origin
//! PDF, so the page fetches it through this endpoint. Only `https` targets
//! are accepted -- the scheme check runs before any outbound request.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Content type assumed when the upstream doesn't declare one.
const DEFAULT_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    pub url: Option<String>,
}

/// Stream a remote document through to the caller.
pub async fn proxy_document(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> AppResult<Response> {
    let raw = query
        .url
        .ok_or_else(|| AppError::BadRequest("Missing `url` query parameter".to_string()))?;

    let target = reqwest::Url::parse(&raw)
        .map_err(|_| AppError::BadRequest("Invalid URL".to_string()))?;

    // Refuse anything but https before touching the network -- this is also
    // the SSRF guard against internal hosts.
    if target.scheme() != "https" {
        return Err(AppError::BadRequest(
            "Only https URLs are allowed".to_string(),
        ));
    }

    let remote = state
        .http
        .get(target)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Upstream request failed: {e}")))?;

    if !remote.status().is_success() {
        return Err(AppError::Upstream(format!(
            "Remote server returned {}",
            remote.status().as_u16()
        )));
    }

    let content_type = remote
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .header(
            header::CONTENT_DISPOSITION,
            "inline; filename=\"eulogy.pdf\"",
        )
        .body(Body::from_stream(remote.bytes_stream()))
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(response)
}
