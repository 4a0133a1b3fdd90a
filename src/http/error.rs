use thiserror::Error;

/// Failures raised while building or sending a request.
///
/// Non-2xx responses are not errors: they come back as ordinary
/// [`ApiResponse`](super::response::ApiResponse) values so callers can inspect the error body.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP method was not set for `{url}`")]
    MissingMethod { url: String },

    #[error("Unsupported HTTP method `{0}`")]
    UnsupportedMethod(String),

    #[error("Invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Failed to serialize request body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("Request to `{url}` failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl RequestError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Transport { source, .. } if source.is_timeout())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RequestError::Transport { .. })
    }
}
