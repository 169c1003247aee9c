use crate::error::{RelayError, Result};

/// Default IGDB API base URL (versioned)
pub const DEFAULT_API_BASE_URL: &str = "https://api.igdb.com/v4";

/// Default Twitch OAuth token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";

const DEFAULT_PORT: u16 = 5000;

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Twitch application client id
    pub client_id: String,

    /// Twitch application client secret
    pub client_secret: String,

    /// Listening port for the HTTP surface
    pub port: u16,

    /// Permissive CORS for local development only
    pub dev_cors: bool,

    /// IGDB API base URL (overridable for tests)
    pub api_base_url: String,

    /// OAuth token endpoint URL (overridable for tests)
    pub token_url: String,
}

impl RelayConfig {
    /// Build configuration from environment variables.
    ///
    /// Requires `IGDB_CLIENT_ID` and `IGDB_CLIENT_SECRET`. Optional:
    /// `PORT` (default 5000) and `RELAY_ENV` (`development` enables the
    /// permissive CORS layer).
    pub fn from_env() -> Result<Self> {
        let client_id = require_env("IGDB_CLIENT_ID")?;
        let client_secret = require_env("IGDB_CLIENT_SECRET")?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| RelayError::Config(format!("PORT is not a valid port: {}", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        let dev_cors = std::env::var("RELAY_ENV")
            .map(|env| env == "development")
            .unwrap_or(false);

        Ok(Self {
            client_id,
            client_secret,
            port,
            dev_cors,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        })
    }

    /// Construct a config with explicit credentials and default URLs
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            port: DEFAULT_PORT,
            dev_cors: false,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    /// Point the relay at a different IGDB base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Point the token exchange at a different endpoint
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RelayError::Config(format!("{} must be set", name)))
}
