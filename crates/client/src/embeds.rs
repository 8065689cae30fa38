//! URL resolution for the livestream and eulogy embeds.

/// Livestream shown when no override is configured.
pub const DEFAULT_LIVESTREAM_URL: &str = "https://www.youtube.com/live/memorial-service";

/// Bundled eulogy document used when no external URL is supplied.
pub const DEFAULT_EULOGY_DOC: &str = "/eulogy.pdf";

/// The livestream URL: the `LIVESTREAM_URL` environment override when set,
/// the built-in default otherwise.
pub fn livestream_url() -> String {
    resolve_livestream(std::env::var("LIVESTREAM_URL").ok())
}

fn resolve_livestream(configured: Option<String>) -> String {
    configured
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LIVESTREAM_URL.to_string())
}

/// The URL the eulogy viewer embeds.
///
/// External documents are routed through the same-origin proxy (browsers
/// refuse to embed a cross-origin PDF); bundled paths pass through as-is.
pub fn eulogy_embed_url(initial: Option<&str>) -> String {
    let initial = initial.unwrap_or(DEFAULT_EULOGY_DOC);

    let lowered = initial.to_ascii_lowercase();
    if !(lowered.starts_with("http://") || lowered.starts_with("https://")) {
        return initial.to_string();
    }

    // Borrow Url's query encoding rather than hand-rolling one; only the
    // path and query of the synthetic base survive.
    let mut url = reqwest::Url::parse("http://site.invalid/api/eulogy/proxy")
        .expect("static base URL is valid");
    url.query_pairs_mut().append_pair("url", initial);

    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
