//! Environment-driven configuration for m365-mcp.
//!
//! Everything is read from the process environment; there is no config file.

use crate::error::{M365Error, Result};
use std::fmt;

/// Application (client) id of the Azure AD app registration.
pub const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";
/// Client secret of the app registration.
pub const ENV_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
/// Directory (tenant) id.
pub const ENV_TENANT_ID: &str = "AZURE_TENANT_ID";
/// Optional override for the identity platform host.
pub const ENV_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
/// Optional override for the Graph API root.
pub const ENV_GRAPH_BASE_URL: &str = "MS_GRAPH_BASE_URL";

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Default log file location.
pub const DEFAULT_LOG_FILE: &str = "/app/logs/mcp_server.log";

/// Client-credential triple for the Microsoft identity platform.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

impl Credentials {
    /// Read the credential triple from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the credential triple through an arbitrary lookup.
    ///
    /// Missing and empty values are treated the same way. Values are not
    /// otherwise validated; malformed ones surface at token acquisition.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.is_empty());

        match (
            read(ENV_CLIENT_ID),
            read(ENV_CLIENT_SECRET),
            read(ENV_TENANT_ID),
        ) {
            (Some(client_id), Some(client_secret), Some(tenant_id)) => Ok(Self {
                client_id,
                client_secret,
                tenant_id,
            }),
            _ => Err(M365Error::credentials_not_configured()),
        }
    }
}

/// Endpoints the Graph client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Identity platform host, e.g. `https://login.microsoftonline.com`.
    pub authority_host: String,
    /// Graph API root including the version segment.
    pub graph_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Load endpoints from the environment, falling back to the public cloud.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
                .trim_end_matches('/')
                .to_string()
        };

        Self {
            authority_host: read(ENV_AUTHORITY_HOST, DEFAULT_AUTHORITY_HOST),
            graph_base_url: read(ENV_GRAPH_BASE_URL, DEFAULT_GRAPH_BASE_URL),
        }
    }

    /// OAuth2 v2 token endpoint for a tenant.
    pub fn token_url(&self, tenant_id: &str) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.authority_host, tenant_id)
    }
}
