//! HTTP client for the hosted Data Service.
//!
//! Wraps the provider's auth, relational, and object-storage endpoints
//! using [`reqwest`]. Every call is a single request/response round trip;
//! retries, caching, and consistency are the provider's problem.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RANGE};
use serde::de::DeserializeOwned;

use crate::config::DataServiceConfig;
use crate::error::DataError;
use crate::models::{AuthUser, GalleryImage, NewGalleryImage, NewTribute, Session, Tribute};
use crate::service::DataService;

/// Table holding guestbook entries.
const TRIBUTES_TABLE: &str = "tributes";
/// Table holding gallery image records.
const GALLERY_TABLE: &str = "gallery_images";

/// Production [`DataService`] implementation talking to the hosted provider.
pub struct HostedDataService {
    client: reqwest::Client,
    config: DataServiceConfig,
}

impl HostedDataService {
    pub fn new(config: DataServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (connection
    /// pooling with the rest of the process).
    pub fn with_client(client: reqwest::Client, config: DataServiceConfig) -> Self {
        Self { client, config }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    /// Headers common to every request: the project API key, plus a bearer
    /// token (the service key unless a user token is supplied).
    fn base_headers(&self, bearer: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(v) = HeaderValue::from_str(&self.config.api_key) {
            headers.insert("apikey", v);
        }
        if let Ok(v) = HeaderValue::from_str(&format!("Bearer {bearer}")) {
            headers.insert(AUTHORIZATION, v);
        }
        headers
    }

    /// Check the status and decode a JSON body, preserving the raw body in
    /// the error when the provider rejects the request.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, DataError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DataError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| DataError::Decode(e.to_string()))
    }

    async fn check_status(response: reqwest::Response) -> Result<(), DataError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(DataError::Api {
            status: status.as_u16(),
            body,
        })
    }

    /// Insert a row with `Prefer: return=representation` and unwrap the
    /// single returned element.
    async fn insert_row<T: DeserializeOwned>(
        &self,
        table: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, DataError> {
        let response = self
            .client
            .post(self.rest_url(table))
            .headers(self.base_headers(&self.config.api_key))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        let mut rows: Vec<T> = Self::parse_response(response).await?;
        rows.pop()
            .ok_or_else(|| DataError::Decode(format!("insert into '{table}' returned no row")))
    }
}

#[async_trait]
impl DataService for HostedDataService {
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, DataError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.config.url))
            .headers(self.base_headers(access_token))
            .send()
            .await?;

        let status = response.status();
        // An unusable token is not an error -- the caller is anonymous.
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Ok(None);
        }

        let user: AuthUser = Self::parse_response(response).await?;
        Ok(Some(user))
    }

    async fn exchange_code(&self, code: &str) -> Result<Session, DataError> {
        let response = self
            .client
            .post(format!(
                "{}/auth/v1/token?grant_type=authorization_code",
                self.config.url
            ))
            .headers(self.base_headers(&self.config.api_key))
            .json(&serde_json::json!({ "auth_code": code }))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn insert_tribute(&self, new: &NewTribute) -> Result<Tribute, DataError> {
        self.insert_row(TRIBUTES_TABLE, new).await
    }

    async fn list_tributes(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<Tribute>, u64), DataError> {
        let end = offset + limit.max(1) - 1;
        let response = self
            .client
            .get(self.rest_url(TRIBUTES_TABLE))
            .headers(self.base_headers(&self.config.api_key))
            .header("Prefer", "count=exact")
            .header(RANGE, format!("{offset}-{end}"))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        let total = total_from_content_range(response.headers());
        let rows: Vec<Tribute> = Self::parse_response(response).await?;
        let total = total.unwrap_or(rows.len() as u64);
        Ok((rows, total))
    }

    async fn insert_gallery_image(
        &self,
        new: &NewGalleryImage,
    ) -> Result<GalleryImage, DataError> {
        self.insert_row(GALLERY_TABLE, new).await
    }

    async fn list_gallery_images(&self) -> Result<Vec<GalleryImage>, DataError> {
        let response = self
            .client
            .get(self.rest_url(GALLERY_TABLE))
            .headers(self.base_headers(&self.config.api_key))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn upload_photo(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DataError> {
        let response = self
            .client
            .post(format!(
                "{}/storage/v1/object/{}/{}",
                self.config.url, self.config.photo_bucket, path
            ))
            .headers(self.base_headers(&self.config.api_key))
            .header(CONTENT_TYPE, content_type)
            .header("cache-control", "max-age=3600")
            .body(bytes)
            .send()
            .await?;

        Self::check_status(response).await?;

        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url, self.config.photo_bucket, path
        ))
    }
}

/// Extract the total row count from a `Content-Range: 0-9/57` header.
fn total_from_content_range(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("content-range")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit_once('/'))
        .and_then(|(_, total)| total.parse().ok())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
