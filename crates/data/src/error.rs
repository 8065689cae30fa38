/// Errors from the Data Service client layer.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Data Service returned a non-2xx status code.
    #[error("Data Service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The Data Service returned a 2xx response we could not interpret.
    #[error("Unexpected Data Service response: {0}")]
    Decode(String),
}
