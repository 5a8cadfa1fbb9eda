//! reqwest-backed Graph client.

use super::auth::ClientSecretCredential;
use super::models::{Collection, Event, Message, Team, User};
use super::GraphApi;
use crate::config::{Credentials, Endpoints};
use crate::error::{M365Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Graph error envelope: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Deserialize)]
struct GraphErrorResponse {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Microsoft Graph client bound to one credential.
pub struct GraphClient {
    http: reqwest::Client,
    credential: ClientSecretCredential,
    base_url: String,
}

impl GraphClient {
    /// Create a client against the endpoints configured in the environment.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_endpoints(credentials, Endpoints::from_env())
    }

    /// Create with explicit endpoints (for testing).
    pub fn with_endpoints(credentials: Credentials, endpoints: Endpoints) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("m365-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let credential = ClientSecretCredential::new(http.clone(), credentials, &endpoints);

        Ok(Self {
            http,
            credential,
            base_url: endpoints.graph_base_url,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let token = self.credential.get_token().await?;
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Failed to read Graph error body: {}", e);
                    String::new()
                }
            };
            return Err(graph_error(status.as_u16(), &body));
        }

        Ok(response.json().await?)
    }
}

fn graph_error(status: u16, body: &str) -> M365Error {
    match serde_json::from_str::<GraphErrorResponse>(body) {
        Ok(envelope) => M365Error::Graph {
            status,
            code: envelope.error.code,
            message: envelope
                .error
                .message
                .unwrap_or_else(|| "Unknown error".to_string()),
        },
        Err(_) => M365Error::Graph {
            status,
            code: None,
            message: if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.trim().to_string()
            },
        },
    }
}

#[async_trait]
impl GraphApi for GraphClient {
    async fn list_messages(&self, top: u32) -> Result<Vec<Message>> {
        let page: Collection<Message> = self
            .get("/me/messages", &[("$top", top.to_string())])
            .await?;
        Ok(page.value)
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let page: Collection<Event> = self.get("/me/calendar/events", &[]).await?;
        Ok(page.value)
    }

    async fn list_joined_teams(&self) -> Result<Vec<Team>> {
        let page: Collection<Team> = self.get("/me/joinedTeams", &[]).await?;
        Ok(page.value)
    }

    async fn get_me(&self) -> Result<User> {
        self.get("/me", &[]).await
    }
}
