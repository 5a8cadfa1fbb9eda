//! MCP (Model Context Protocol) server exposing the Microsoft 365 tools.

pub mod dispatch;
pub mod render;
pub mod server;
pub mod tools;

pub use dispatch::{Dispatcher, ToolCall, ToolError, ToolOutput};
pub use server::McpServer;
pub use tools::{get_tools, CallToolResult, TextContent, ToolDefinition, ToolName};
