use thiserror::Error;

/// Fallback shown when a non-2xx response carries no usable message.
pub const DEFAULT_API_ERROR_MESSAGE: &str = "Something went wrong";
/// Shown when the request never produced a response at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Client-side error taxonomy. Everything here is meant to be displayed;
/// nothing is swallowed or retried by this crate.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Required input missing or malformed; detected before any network call.
    #[error("{0}")]
    Validation(String),
    /// Non-2xx response with a server-supplied message.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The request could not complete; carries no status code.
    #[error("{0}")]
    Network(String),
    /// Local key-value store read/write failure.
    #[error("persistence failure: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl ClientError {
    pub fn network() -> Self {
        ClientError::Network(NETWORK_ERROR_MESSAGE.to_string())
    }

    /// HTTP status of an API failure. `None` for every other kind, which is
    /// how callers tell an API error from a network error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
