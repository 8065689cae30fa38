//! Shared test harness: an in-memory Data Service and a router builder
//! that mirrors the production middleware stack.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::Router;
use chrono::TimeZone;
use http_body_util::BodyExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use keepsake_api::config::ServerConfig;
use keepsake_api::routes;
use keepsake_api::state::AppState;
use keepsake_data::models::{
    AuthUser, GalleryImage, NewGalleryImage, NewTribute, Session, Tribute,
};
use keepsake_data::{DataError, DataService, DataServiceConfig};

// ---------------------------------------------------------------------------
// Mock Data Service
// ---------------------------------------------------------------------------

/// In-memory stand-in for the hosted provider.
///
/// Rows live in mutex-guarded vectors; each `fail_*` flag makes the
/// corresponding operation return a provider-style error.
#[derive(Default)]
pub struct MockDataService {
    pub tributes: Mutex<Vec<Tribute>>,
    pub gallery: Mutex<Vec<GalleryImage>>,
    /// Storage paths that reached the object store.
    pub uploaded_paths: Mutex<Vec<String>>,
    /// User returned for any bearer token.
    pub user: Option<AuthUser>,
    pub fail_tributes: bool,
    pub fail_gallery_list: bool,
    pub fail_gallery_insert: bool,
    pub fail_uploads: bool,
    pub fail_auth: bool,
    clock: AtomicI64,
}

impl MockDataService {
    pub fn new() -> Self {
        Self::default()
    }

    fn provider_error(op: &str) -> DataError {
        DataError::Api {
            status: 500,
            body: format!("mock {op} failure"),
        }
    }

    /// Monotonic fake timestamps so insertion order maps to `created_at`.
    fn next_timestamp(&self) -> chrono::DateTime<chrono::Utc> {
        let n = self.clock.fetch_add(1, Ordering::SeqCst);
        chrono::Utc.timestamp_opt(1_700_000_000 + n, 0).unwrap()
    }

    /// Seed a tribute directly, bypassing the HTTP surface.
    pub fn seed_tribute(&self, name: &str, message: &str) -> Tribute {
        let tribute = Tribute {
            id: Uuid::new_v4(),
            user_id: None,
            name: name.to_string(),
            email: None,
            message: message.to_string(),
            photo_url: None,
            tribute_photo_url: None,
            is_anonymous: false,
            created_at: self.next_timestamp(),
        };
        self.tributes.lock().unwrap().push(tribute.clone());
        tribute
    }

    /// Seed a gallery image directly, bypassing the HTTP surface.
    pub fn seed_gallery_image(&self, public_url: &str, alt_text: Option<&str>) -> GalleryImage {
        let image = GalleryImage {
            id: Uuid::new_v4(),
            storage_path: format!("seed/{}", Uuid::new_v4()),
            public_url: public_url.to_string(),
            alt_text: alt_text.map(str::to_string),
            created_at: self.next_timestamp(),
        };
        self.gallery.lock().unwrap().push(image.clone());
        image
    }
}

#[async_trait]
impl DataService for MockDataService {
    async fn current_user(&self, _access_token: &str) -> Result<Option<AuthUser>, DataError> {
        if self.fail_auth {
            return Err(Self::provider_error("auth"));
        }
        Ok(self.user.clone())
    }

    async fn exchange_code(&self, _code: &str) -> Result<Session, DataError> {
        if self.fail_auth {
            return Err(Self::provider_error("auth"));
        }
        Ok(Session {
            access_token: "mock-access-token".to_string(),
            refresh_token: None,
            user: self.user.clone(),
        })
    }

    async fn insert_tribute(&self, new: &NewTribute) -> Result<Tribute, DataError> {
        if self.fail_tributes {
            return Err(Self::provider_error("tribute insert"));
        }
        let tribute = Tribute {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            name: new.name.clone(),
            email: new.email.clone(),
            message: new.message.clone(),
            photo_url: new.photo_url.clone(),
            tribute_photo_url: new.tribute_photo_url.clone(),
            is_anonymous: new.is_anonymous,
            created_at: self.next_timestamp(),
        };
        self.tributes.lock().unwrap().push(tribute.clone());
        Ok(tribute)
    }

    async fn list_tributes(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<Tribute>, u64), DataError> {
        if self.fail_tributes {
            return Err(Self::provider_error("tribute list"));
        }
        let mut rows = self.tributes.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = rows.len() as u64;
        let page = rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn insert_gallery_image(
        &self,
        new: &NewGalleryImage,
    ) -> Result<GalleryImage, DataError> {
        if self.fail_gallery_insert {
            return Err(Self::provider_error("gallery insert"));
        }
        let image = GalleryImage {
            id: Uuid::new_v4(),
            storage_path: new.storage_path.clone(),
            public_url: new.public_url.clone(),
            alt_text: Some(new.alt_text.clone()),
            created_at: self.next_timestamp(),
        };
        self.gallery.lock().unwrap().push(image.clone());
        Ok(image)
    }

    async fn list_gallery_images(&self) -> Result<Vec<GalleryImage>, DataError> {
        if self.fail_gallery_list {
            return Err(Self::provider_error("gallery list"));
        }
        let mut rows = self.gallery.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn upload_photo(
        &self,
        path: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, DataError> {
        if self.fail_uploads {
            return Err(Self::provider_error("upload"));
        }
        self.uploaded_paths.lock().unwrap().push(path.to_string());
        Ok(format!("https://storage.test/public/{path}"))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        data_service: DataServiceConfig {
            url: "https://data.test".to_string(),
            api_key: "test-key".to_string(),
            photo_bucket: "tribute-photos".to_string(),
        },
    }
}

/// Build the full application router over the given mock Data Service.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(data: Arc<MockDataService>) -> Router {
    let state = AppState {
        data,
        http: reqwest::Client::new(),
        config: Arc::new(test_config()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3000".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::auth::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a GET request with no body.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a multipart request carrying a single file field.
pub fn multipart_file_request(
    uri: &str,
    field_name: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    let boundary = "keepsake-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
