use thiserror::Error;

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum RelayError {
    /// Bad caller input, rejected before any provider call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential exchange against the identity provider failed
    #[error("Token exchange failed: {0}")]
    Auth(String),

    /// IGDB answered with a non-success status after successful auth
    #[error("IGDB request failed: {status} {status_text} - {body}")]
    Upstream {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Network-level failure talking to IGDB (no status available)
    #[error("IGDB request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Provider body that does not parse as the expected JSON shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing or invalid environment configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RelayError>;
