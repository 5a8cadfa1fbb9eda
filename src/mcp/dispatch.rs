//! Tool routing, argument parsing, and the handlers behind each tool.

use super::render;
use super::tools::{CallToolResult, ToolName, DEFAULT_DAYS, DEFAULT_TOP};
use crate::error::{M365Error, Result};
use crate::graph::ClientFactory;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// A validated tool invocation with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCall {
    ListEmails { top: u32 },
    GetCalendarEvents { days: u32 },
    ListTeams,
    GetUserProfile,
}

impl ToolCall {
    /// Parse the argument object for `tool`.
    ///
    /// Absent and `null` values take the registry default. Unknown keys are ignored.
    pub fn parse(tool: ToolName, arguments: &Value) -> Result<Self> {
        match tool {
            ToolName::ListEmails => Ok(ToolCall::ListEmails {
                top: count_arg(arguments, "top", DEFAULT_TOP)?,
            }),
            ToolName::GetCalendarEvents => Ok(ToolCall::GetCalendarEvents {
                days: count_arg(arguments, "days", DEFAULT_DAYS)?,
            }),
            ToolName::ListTeams => Ok(ToolCall::ListTeams),
            ToolName::GetUserProfile => Ok(ToolCall::GetUserProfile),
        }
    }

    pub fn tool(&self) -> ToolName {
        match self {
            ToolCall::ListEmails { .. } => ToolName::ListEmails,
            ToolCall::GetCalendarEvents { .. } => ToolName::GetCalendarEvents,
            ToolCall::ListTeams => ToolName::ListTeams,
            ToolCall::GetUserProfile => ToolName::GetUserProfile,
        }
    }
}

/// Read a non-negative whole number. JSON numbers like `5.0` are accepted.
fn count_arg(arguments: &Value, name: &str, default: u32) -> Result<u32> {
    let invalid = |message: &str| M365Error::InvalidArgument {
        name: name.to_string(),
        message: message.to_string(),
    };

    let value = match arguments.get(name) {
        None | Some(Value::Null) => return Ok(default),
        Some(value) => value,
    };

    let number = value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
        .ok_or_else(|| invalid("expected a non-negative whole number"))?;

    u32::try_from(number).map_err(|_| invalid("value is too large"))
}

/// Failure outcome of a tool call. `Display` is the text sent to the caller.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Name not in the registry. Reported to the caller as ordinary content.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A handler's Graph call (or client construction) failed.
    #[error("Error retrieving {resource}: {source}")]
    Retrieval {
        resource: &'static str,
        #[source]
        source: M365Error,
    },

    /// Rejected before reaching a handler.
    #[error("Error: {0}")]
    Dispatch(M365Error),

    /// The handler task panicked.
    #[error("Error: {0}")]
    Panicked(String),
}

impl ToolError {
    fn retrieval(resource: &'static str, source: M365Error) -> Self {
        tracing::warn!("Error retrieving {}: {}", resource, source);
        ToolError::Retrieval { resource, source }
    }

    /// The underlying error, when there is one.
    pub fn kind(&self) -> Option<&M365Error> {
        match self {
            ToolError::Retrieval { source, .. } => Some(source),
            ToolError::Dispatch(e) => Some(e),
            ToolError::UnknownTool(_) | ToolError::Panicked(_) => None,
        }
    }
}

/// Rendered text on success, structured error otherwise.
pub type ToolOutput = std::result::Result<String, ToolError>;

impl From<ToolOutput> for CallToolResult {
    fn from(output: ToolOutput) -> Self {
        match output {
            Ok(text) => CallToolResult::text(text),
            Err(e) => CallToolResult::text(e.to_string()),
        }
    }
}

/// Routes tool calls to handlers and converts every failure into a `ToolError`.
pub struct Dispatcher {
    factory: Arc<ClientFactory>,
}

impl Dispatcher {
    pub fn new(factory: ClientFactory) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Invoke a tool by wire name.
    ///
    /// Never panics and never returns early without an outcome: handler
    /// failures become `Retrieval`, handler panics become `Panicked`.
    pub async fn call_tool(&self, name: &str, arguments: &Value) -> ToolOutput {
        let Some(tool) = ToolName::from_name(name) else {
            tracing::warn!("Unknown tool requested: {}", name);
            return Err(ToolError::UnknownTool(name.to_string()));
        };

        let call = ToolCall::parse(tool, arguments).map_err(|e| {
            tracing::error!("Error calling tool {}: {}", name, e);
            ToolError::Dispatch(e)
        })?;

        tracing::info!("Calling tool {}", tool);

        let factory = Arc::clone(&self.factory);
        let handle = tokio::spawn(async move { run(&factory, call).await });

        match handle.await {
            Ok(output) => output,
            Err(join_error) => {
                let message = if join_error.is_panic() {
                    panic_message(join_error.into_panic())
                } else {
                    join_error.to_string()
                };
                tracing::error!("Error calling tool {}: {}", name, message);
                Err(ToolError::Panicked(message))
            }
        }
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool handler panicked".to_string()
    }
}

async fn run(factory: &ClientFactory, call: ToolCall) -> ToolOutput {
    match call {
        ToolCall::ListEmails { top } => list_emails(factory, top).await,
        ToolCall::GetCalendarEvents { days } => get_calendar_events(factory, days).await,
        ToolCall::ListTeams => list_teams(factory).await,
        ToolCall::GetUserProfile => get_user_profile(factory).await,
    }
}

async fn list_emails(factory: &ClientFactory, top: u32) -> ToolOutput {
    let result = async {
        let graph = factory.get_client().await?;
        graph.list_messages(top).await
    }
    .await;

    result
        .map(|messages| render::emails(&messages, top))
        .map_err(|e| ToolError::retrieval("emails", e))
}

async fn get_calendar_events(factory: &ClientFactory, days: u32) -> ToolOutput {
    let result = async {
        let graph = factory.get_client().await?;
        graph.list_events().await
    }
    .await;

    result
        .map(|events| render::calendar_events(&events, days))
        .map_err(|e| ToolError::retrieval("events", e))
}

async fn list_teams(factory: &ClientFactory) -> ToolOutput {
    let result = async {
        let graph = factory.get_client().await?;
        graph.list_joined_teams().await
    }
    .await;

    result
        .map(|teams| render::teams(&teams))
        .map_err(|e| ToolError::retrieval("teams", e))
}

async fn get_user_profile(factory: &ClientFactory) -> ToolOutput {
    let result = async {
        let graph = factory.get_client().await?;
        graph.get_me().await
    }
    .await;

    result
        .map(|user| render::user_profile(&user))
        .map_err(|e| ToolError::retrieval("profile", e))
}
