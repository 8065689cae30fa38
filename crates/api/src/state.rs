use std::sync::Arc;

use keepsake_data::DataService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Client for the hosted Data Service (auth, tables, object storage).
    pub data: Arc<dyn DataService>,
    /// Plain HTTP client for the eulogy proxy.
    pub http: reqwest::Client,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
