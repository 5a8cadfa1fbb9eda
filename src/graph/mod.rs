//! Microsoft Graph access: identity, HTTP client, and the shared client factory.

mod auth;
mod client;
mod factory;
mod models;


pub use auth::{AccessToken, ClientSecretCredential};
pub use client::GraphClient;
pub use factory::{ClientBuilder, ClientFactory};
pub use models::{
    Collection, DateTimeTimeZone, EmailAddress, Event, Message, Recipient, Team, User,
};

use crate::error::Result;
use async_trait::async_trait;

/// Read-only Graph operations used by the tool handlers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// `GET /me/messages?$top={top}`.
    async fn list_messages(&self, top: u32) -> Result<Vec<Message>>;

    /// `GET /me/calendar/events`.
    async fn list_events(&self) -> Result<Vec<Event>>;

    /// `GET /me/joinedTeams`.
    async fn list_joined_teams(&self) -> Result<Vec<Team>>;

    /// `GET /me`.
    async fn get_me(&self) -> Result<User>;
}
