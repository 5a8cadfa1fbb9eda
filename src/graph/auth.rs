//! Client-credentials token acquisition against the Microsoft identity platform.

use crate::config::{Credentials, Endpoints};
use crate::error::{M365Error, Result};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Scope requesting every application permission granted to the app.
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Tokens are renewed this long before they expire.
const EXPIRY_SKEW: Duration = Duration::from_secs(30);

/// Bearer token plus its local expiry instant.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        self.expires_at > Instant::now() + EXPIRY_SKEW
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Confidential-client credential using a client secret.
///
/// Holds the last token and hands it out until it nears expiry.
pub struct ClientSecretCredential {
    http: reqwest::Client,
    credentials: Credentials,
    token_url: String,
    token: Mutex<Option<AccessToken>>,
}

impl ClientSecretCredential {
    pub fn new(http: reqwest::Client, credentials: Credentials, endpoints: &Endpoints) -> Self {
        let token_url = endpoints.token_url(&credentials.tenant_id);
        Self {
            http,
            credentials,
            token_url,
            token: Mutex::new(None),
        }
    }

    /// Return a bearer token, requesting a new one when none is cached or it is stale.
    pub async fn get_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<AccessToken> {
        tracing::debug!(
            "Requesting Graph token for client {} in tenant {}",
            self.credentials.client_id,
            self.credentials.tenant_id
        );

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", GRAPH_DEFAULT_SCOPE),
        ];

        let response = self.http.post(&self.token_url).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => err
                    .error_description
                    .map(|d| format!("{}: {}", err.error, d))
                    .unwrap_or(err.error),
                Err(_) => format!("HTTP {} from token endpoint", status.as_u16()),
            };
            return Err(M365Error::Authentication(message));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(AccessToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}
