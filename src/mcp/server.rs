//! MCP JSON-RPC 2.0 server over stdio.

use super::dispatch::Dispatcher;
use super::tools::{get_tools, CallToolResult};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "mcp-m365";

/// MCP Server exposing Microsoft 365 tools.
#[derive(Clone)]
pub struct McpServer {
    dispatcher: Arc<Dispatcher>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[serde(rename = "jsonrpc")]
    _jsonrpc: String,
    /// `None` only when the member is absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present_id")]
    id: Option<serde_json::Value>,
    method: String,
    #[serde(default)]
    params: serde_json::Value,
}

fn present_id<'de, D>(deserializer: D) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl JsonRpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl JsonRpcResponse {
    fn from_result(
        id: Option<serde_json::Value>,
        result: std::result::Result<serde_json::Value, JsonRpcError>,
    ) -> Self {
        match result {
            Ok(value) => Self {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(value),
                error: None,
            },
            Err(error) => Self {
                jsonrpc: "2.0".to_string(),
                id,
                result: None,
                error: Some(error),
            },
        }
    }
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Run the MCP server over stdio.
    pub async fn run(&self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve newline-delimited JSON-RPC from `reader`, answering on `writer`.
    ///
    /// `tools/call` requests run concurrently; their responses are written as
    /// they complete. Returns once `reader` hits EOF and every pending call
    /// has been answered.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let writer_task = tokio::spawn(write_responses(rx, writer));

        tracing::info!("MCP server started, listening on stdio");

        let mut segments = BufReader::new(reader).split(b'\n');
        loop {
            let bytes = match segments.next_segment().await {
                Ok(Some(bytes)) => bytes,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    break;
                }
            };

            // Undecodable lines are answered and skipped, never fatal.
            let line = match std::str::from_utf8(&bytes) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Parse error: {}", e);
                    send_parse_error(&tx, format!("Parse error: invalid UTF-8: {}", e));
                    continue;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(line) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("Parse error: {}", e);
                    send_parse_error(&tx, format!("Parse error: {}", e));
                    continue;
                }
            };

            if request.method == "tools/call" {
                let server = self.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(response) = server.handle_request(request).await {
                        send(&tx, &response);
                    }
                });
            } else if let Some(response) = self.handle_request(request).await {
                send(&tx, &response);
            }
        }

        drop(tx);
        match writer_task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Response writer failed: {}", e);
                Ok(())
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        // Notifications carry no id and get no reply.
        if request.id.is_none() {
            tracing::debug!("Notification received: {}", request.method);
            return None;
        }

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize().await,
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => self.handle_tools_list().await,
            "tools/call" => self.handle_tools_call(request.params).await,
            _ => Err(JsonRpcError::new(
                -32601,
                format!("Method not found: {}", request.method),
            )),
        };

        Some(JsonRpcResponse::from_result(request.id, result))
    }

    async fn handle_initialize(&self) -> std::result::Result<serde_json::Value, JsonRpcError> {
        Ok(serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        }))
    }

    async fn handle_tools_list(&self) -> std::result::Result<serde_json::Value, JsonRpcError> {
        let tools = get_tools();
        Ok(serde_json::json!({ "tools": tools }))
    }

    async fn handle_tools_call(
        &self,
        params: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, JsonRpcError> {
        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| JsonRpcError::new(-32602, "Missing tool name"))?;

        let arguments = params
            .get("arguments")
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or(serde_json::json!({}));

        let output = self.dispatcher.call_tool(name, &arguments).await;

        serde_json::to_value(CallToolResult::from(output))
            .map_err(|e| JsonRpcError::new(-32603, format!("Internal error: {}", e)))
    }
}

fn send_parse_error(tx: &mpsc::UnboundedSender<String>, message: String) {
    let response = JsonRpcResponse::from_result(None, Err(JsonRpcError::new(-32700, message)));
    send(tx, &response);
}

fn send(tx: &mpsc::UnboundedSender<String>, response: &JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(line) => {
            if tx.send(line).is_err() {
                tracing::error!("Response writer closed, dropping response");
            }
        }
        Err(e) => tracing::error!("Failed to serialize response: {}", e),
    }
}

async fn write_responses<W>(mut rx: mpsc::UnboundedReceiver<String>, mut writer: W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = rx.recv().await {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
