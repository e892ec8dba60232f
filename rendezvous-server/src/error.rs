//! Error types for the signaling server

use thiserror::Error;

/// Errors that stop the server from starting or serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    /// An allowed origin is not a valid header value
    #[error("invalid allowed origin: {0:?}")]
    InvalidOrigin(String),
}

/// Errors from a single client frame. These never close the connection.
#[derive(Error, Debug)]
pub enum ClientRequestError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
