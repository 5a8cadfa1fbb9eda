//! Lazily constructed, process-wide Graph client.

use super::{GraphApi, GraphClient};
use crate::config::Credentials;
use crate::error::{M365Error, Result};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Constructor invoked once to build the shared client.
pub type ClientBuilder = Box<dyn Fn() -> Result<Arc<dyn GraphApi>> + Send + Sync>;

/// Owns the single Graph client shared by all tool handlers.
///
/// The client is built on the first successful `get_client` call. Concurrent
/// first callers wait on the same initialization. A failed build leaves the
/// cell empty so the next call tries again.
pub struct ClientFactory {
    cell: OnceCell<Arc<dyn GraphApi>>,
    builder: ClientBuilder,
}

impl ClientFactory {
    /// Factory that reads Azure credentials from the environment on first use.
    pub fn from_env() -> Self {
        Self::with_builder(|| {
            let credentials = Credentials::from_env()?;
            tracing::info!(
                "Initializing Microsoft Graph client for tenant {}",
                credentials.tenant_id
            );
            let client = GraphClient::new(credentials)?;
            Ok(Arc::new(client) as Arc<dyn GraphApi>)
        })
    }

    /// Factory with a custom constructor.
    pub fn with_builder<F>(builder: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn GraphApi>> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            builder: Box::new(builder),
        }
    }

    /// Factory around an already constructed client.
    pub fn with_client(client: Arc<dyn GraphApi>) -> Self {
        Self {
            cell: OnceCell::new_with(Some(client)),
            builder: Box::new(|| {
                Err(M365Error::Config("Graph client already initialized".to_string()))
            }),
        }
    }

    /// Return the shared client, building it on first use.
    pub async fn get_client(&self) -> Result<Arc<dyn GraphApi>> {
        let client = self
            .cell
            .get_or_try_init(|| async { (self.builder)() })
            .await?;
        Ok(Arc::clone(client))
    }

    /// Whether the client has been constructed.
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}
