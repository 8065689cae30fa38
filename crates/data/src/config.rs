/// Connection settings for the hosted Data Service.
#[derive(Debug, Clone)]
pub struct DataServiceConfig {
    /// Base URL of the provider, e.g. `https://abc.example.co`.
    pub url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Object-storage bucket for uploaded photos.
    pub photo_bucket: String,
}

impl DataServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                     | Default           |
    /// |-----------------------------|-------------------|
    /// | `DATA_SERVICE_URL`          | (required)        |
    /// | `DATA_SERVICE_KEY`          | (required)        |
    /// | `DATA_SERVICE_PHOTO_BUCKET` | `tribute-photos`  |
    pub fn from_env() -> Self {
        let url = std::env::var("DATA_SERVICE_URL")
            .expect("DATA_SERVICE_URL must be set")
            .trim_end_matches('/')
            .to_string();

        let api_key = std::env::var("DATA_SERVICE_KEY").expect("DATA_SERVICE_KEY must be set");

        let photo_bucket = std::env::var("DATA_SERVICE_PHOTO_BUCKET")
            .unwrap_or_else(|_| "tribute-photos".into());

        Self {
            url,
            api_key,
            photo_bucket,
        }
    }
}
