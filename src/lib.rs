//! # m365-mcp
//!
//! An MCP (Model Context Protocol) server that exposes read-only Microsoft 365
//! data to AI assistants through Microsoft Graph.
//!
//! ## Tools
//!
//! - `list_emails` - recent Outlook messages (`top`, default 10)
//! - `get_calendar_events` - calendar events (`days`, default 7)
//! - `list_teams` - Teams the user has joined
//! - `get_user_profile` - the signed-in user's profile
//!
//! ## Usage
//!
//! ```bash
//! export AZURE_CLIENT_ID=... AZURE_CLIENT_SECRET=... AZURE_TENANT_ID=...
//! m365-mcp
//! ```
//!
//! Credentials are read on the first tool call, not at startup.

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod mcp;

pub use config::{Credentials, Endpoints};
pub use error::{M365Error, Result};
