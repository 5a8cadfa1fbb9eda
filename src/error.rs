//! Error types for m365-mcp.

use thiserror::Error;

/// Result type alias for m365-mcp.
pub type Result<T> = std::result::Result<T, M365Error>;

/// Errors raised while resolving credentials or talking to Microsoft 365.
#[derive(Error, Debug)]
pub enum M365Error {
    /// Configuration error.
    #[error("{0}")]
    Config(String),

    /// Network/HTTP transport error.
    #[error("Network error: {0}")]
    Network(String),

    /// Token acquisition rejected by the identity platform.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Graph API returned a non-success status.
    #[error("Graph API error ({status}{}): {message}", .code.as_deref().map(|c| format!(" {c}")).unwrap_or_default())]
    Graph {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Tool argument failed validation.
    #[error("Invalid argument `{name}`: {message}")]
    InvalidArgument { name: String, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl M365Error {
    /// The error raised when any Azure credential is missing.
    pub fn credentials_not_configured() -> Self {
        M365Error::Config("Azure credentials not configured".to_string())
    }
}

impl From<reqwest::Error> for M365Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            M365Error::Serialization(e.to_string())
        } else {
            M365Error::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for M365Error {
    fn from(e: serde_json::Error) -> Self {
        M365Error::Serialization(e.to_string())
    }
}
