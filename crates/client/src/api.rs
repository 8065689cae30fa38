//! HTTP client for the site's own API.
//!
//! Wraps the tribute, gallery, and upload endpoints using [`reqwest`].
//! Server-side error bodies (`{error, code}`) are surfaced with their
//! user-facing message intact so widgets can show them inline.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use keepsake_core::pagination::Pagination;
use keepsake_data::models::Tribute;

/// Errors from the site API layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// User-facing message from the `{error}` body, or the raw body.
        message: String,
    },

    /// The API returned a 2xx response we could not interpret.
    #[error("Unexpected API response: {0}")]
    Decode(String),
}

/// Request body for tribute submission.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTribute {
    pub message: String,
    pub is_anonymous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tribute_photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitTributeResponse {
    pub success: bool,
    pub message: String,
    pub tribute: Tribute,
}

/// One page of tributes.
#[derive(Debug, Deserialize)]
pub struct TributesPage {
    pub tributes: Vec<Tribute>,
    pub pagination: Pagination,
}

/// One gallery entry as served by `GET /api/gallery`.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryEntry {
    pub id: String,
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub public_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GalleryListResponse {
    images: Vec<GalleryEntry>,
}

/// Result of a single photo upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResult {
    pub success: bool,
    pub path: String,
    pub url: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// Client for the memorial site's HTTP surface.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for a site instance.
    ///
    /// * `base_url` - Site origin, e.g. `https://memorial.example`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Submit a tribute and return the persisted record.
    pub async fn submit_tribute(&self, input: &SubmitTribute) -> Result<Tribute, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/tributes", self.base_url))
            .json(input)
            .send()
            .await?;

        let parsed: SubmitTributeResponse = Self::parse_response(response).await?;
        Ok(parsed.tribute)
    }

    /// Fetch one page of tributes, newest first.
    pub async fn list_tributes(&self, page: u32, limit: u32) -> Result<TributesPage, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/tributes", self.base_url))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the gallery image list, newest first.
    pub async fn fetch_gallery(&self) -> Result<Vec<GalleryEntry>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/gallery", self.base_url))
            .send()
            .await?;

        let parsed: GalleryListResponse = Self::parse_response(response).await?;
        Ok(parsed.images)
    }

    /// Upload a photo as a multipart `file` field.
    pub async fn upload_photo(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResult, ClientError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/api/gallery/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Check the status and decode a JSON body. Error bodies are reduced to
    /// their `{error}` message when present.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["error"].as_str().map(str::to_string))
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
