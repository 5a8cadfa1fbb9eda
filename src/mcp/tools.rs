//! MCP tool definitions and tool-call result shapes.

use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Default `top` for `list_emails`.
pub const DEFAULT_TOP: u32 = 10;
/// Default `days` for `get_calendar_events`.
pub const DEFAULT_DAYS: u32 = 7;

/// The fixed set of tools this server exposes.
///
/// Both the registry and the dispatcher's routing are derived from this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ListEmails,
    GetCalendarEvents,
    ListTeams,
    GetUserProfile,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::ListEmails,
        ToolName::GetCalendarEvents,
        ToolName::ListTeams,
        ToolName::GetUserProfile,
    ];

    /// Wire name of the tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::ListEmails => "list_emails",
            ToolName::GetCalendarEvents => "get_calendar_events",
            ToolName::ListTeams => "list_teams",
            ToolName::GetUserProfile => "get_user_profile",
        }
    }

    /// Look up a tool by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::ListEmails => "List recent emails from Outlook",
            ToolName::GetCalendarEvents => "Get upcoming calendar events",
            ToolName::ListTeams => "List Microsoft Teams the user is a member of",
            ToolName::GetUserProfile => "Get current user's profile information",
        }
    }

    pub fn input_schema(&self) -> serde_json::Value {
        match self {
            ToolName::ListEmails => json!({
                "type": "object",
                "properties": {
                    "top": {
                        "type": "number",
                        "description": "Number of emails to retrieve",
                        "default": DEFAULT_TOP
                    }
                }
            }),
            ToolName::GetCalendarEvents => json!({
                "type": "object",
                "properties": {
                    "days": {
                        "type": "number",
                        "description": "Number of days to look ahead",
                        "default": DEFAULT_DAYS
                    }
                }
            }),
            ToolName::ListTeams | ToolName::GetUserProfile => json!({
                "type": "object",
                "properties": {}
            }),
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl From<ToolName> for ToolDefinition {
    fn from(tool: ToolName) -> Self {
        Self {
            name: tool.as_str().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.input_schema(),
        }
    }
}

/// Get all available MCP tools.
pub fn get_tools() -> Vec<ToolDefinition> {
    ToolName::ALL.into_iter().map(ToolDefinition::from).collect()
}

/// One text block of a tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content_type: "text",
            text: text.into(),
        }
    }
}

/// Result payload of `tools/call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToolResult {
    pub content: Vec<TextContent>,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(text)],
        }
    }
}
