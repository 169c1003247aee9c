use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::{RelayError, Result};

/// Seconds subtracted from the provider-declared token lifetime.
///
/// Absorbs clock skew and in-flight latency: a token is never handed out
/// within this margin of its real expiry.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Twitch application credential pair, immutable for the process lifetime
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// A cached OAuth access token. At most one exists at a time.
#[derive(Debug, Clone)]
struct Token {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Token {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    fn from_exchange(value: String, expires_in: i64, now: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: now + Duration::seconds(expires_in - EXPIRY_MARGIN_SECS),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Owns the `client_credentials` token lifecycle: lazy acquisition, expiry
/// tracking, and on-demand renewal against the Twitch token endpoint.
///
/// The token slot sits behind an async mutex that stays held across the
/// exchange, so concurrent callers that observe an expired token coalesce
/// onto a single outbound exchange instead of stampeding the endpoint.
/// There is no background refresh; expiry is checked lazily at the top of
/// every [`ensure_valid_token`](Self::ensure_valid_token) call.
pub struct TokenManager {
    client: Client,
    credentials: Credentials,
    token_url: String,
    current: Mutex<Option<Token>>,
}

impl TokenManager {
    pub fn new(client: Client, credentials: Credentials, token_url: impl Into<String>) -> Self {
        Self {
            client,
            credentials,
            token_url: token_url.into(),
            current: Mutex::new(None),
        }
    }

    /// Return a token whose expiry is strictly in the future, exchanging
    /// credentials first if none is held or the held one has expired.
    ///
    /// Exactly one outbound exchange per renewal, no retries; a failed
    /// exchange surfaces as [`RelayError::Auth`] and the caller decides
    /// whether to retry the whole outer operation.
    pub async fn ensure_valid_token(&self) -> Result<String> {
        let mut current = self.current.lock().await;

        if let Some(token) = current.as_ref() {
            if !token.is_expired(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let token = self.exchange().await?;
        let value = token.value.clone();
        *current = Some(token);

        Ok(value)
    }

    async fn exchange(&self) -> Result<Token> {
        tracing::debug!("Exchanging client credentials for a new access token");

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| RelayError::Auth(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RelayError::Auth(format!(
                "token endpoint returned HTTP {}",
                response.status()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Auth(format!("malformed token response: {}", e)))?;

        let token = Token::from_exchange(body.access_token, body.expires_in, Utc::now());

        tracing::info!("Obtained access token, valid until {}", token.expires_at);

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_subtracted_from_declared_lifetime() {
        let issued = Utc::now();
        let token = Token::from_exchange("abc".to_string(), 3600, issued);

        assert_eq!(token.expires_at, issued + Duration::seconds(3600 - 60));
    }

    #[test]
    fn test_expiry_threshold_is_exact() {
        let issued = Utc::now();
        let token = Token::from_exchange("abc".to_string(), 3600, issued);
        let threshold = issued + Duration::seconds(3600 - 60);

        // One second before the threshold the token is still served
        assert!(!token.is_expired(threshold - Duration::seconds(1)));
        // At the threshold and past it, renewal triggers
        assert!(token.is_expired(threshold));
        assert!(token.is_expired(threshold + Duration::seconds(1)));
    }

    #[test]
    fn test_short_lifetime_is_already_expired() {
        // A declared lifetime inside the margin yields a token that is
        // expired on arrival; the next call simply exchanges again.
        let issued = Utc::now();
        let token = Token::from_exchange("abc".to_string(), 30, issued);

        assert!(token.is_expired(issued));
    }
}
