use super::*;
use crate::error::M365Error;
use crate::graph::{ClientFactory, GraphApi, MockGraphApi, Team};
use serde_json::{json, Value};
use tokio::io::AsyncReadExt;

fn unconfigured_server() -> McpServer {
    McpServer::new(Dispatcher::new(ClientFactory::with_builder(|| {
        Err(M365Error::credentials_not_configured())
    })))
}

async fn exchange(server: &McpServer, input: &str) -> Vec<Value> {
    exchange_bytes(server, input.as_bytes()).await
}

async fn exchange_bytes(server: &McpServer, input: &[u8]) -> Vec<Value> {
    let (client, server_out) = tokio::io::duplex(64 * 1024);
    server
        .serve(input, server_out)
        .await
        .unwrap();

    let mut raw = String::new();
    let mut client = client;
    client.read_to_string(&mut raw).await.unwrap();

    raw.lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn by_id(responses: &[Value], id: i64) -> &Value {
    responses
        .iter()
        .find(|r| r["id"] == id)
        .unwrap_or_else(|| panic!("no response with id {id}: {responses:?}"))
}

#[tokio::test]
async fn test_initialize() {
    let server = unconfigured_server();
    let responses = exchange(
        &server,
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
    )
    .await;

    assert_eq!(responses.len(), 1);
    let result = &responses[0]["result"];
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "mcp-m365");
    assert!(result["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_tools_list() {
    let server = unconfigured_server();
    let responses = exchange(
        &server,
        r#"{"jsonrpc":"2.0","id":"a","method":"tools/list"}"#,
    )
    .await;

    let tools = responses[0]["result"]["tools"].as_array().unwrap();
    let names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        ["list_emails", "get_calendar_events", "list_teams", "get_user_profile"]
    );
    assert_eq!(responses[0]["id"], "a");
}

#[tokio::test]
async fn test_unknown_tool_is_content_not_error() {
    let server = unconfigured_server();
    let responses = exchange(
        &server,
        r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"delete_mailbox","arguments":{}}}"#,
    )
    .await;

    let response = by_id(&responses, 7);
    assert!(response.get("error").is_none());
    assert_eq!(
        response["result"],
        json!({"content": [{"type": "text", "text": "Unknown tool: delete_mailbox"}]})
    );
}

#[tokio::test]
async fn test_missing_credentials_is_content() {
    let server = unconfigured_server();
    let responses = exchange(
        &server,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"list_emails"}}"#,
    )
    .await;

    let content = by_id(&responses, 2)["result"]["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    assert!(content[0]["text"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_protocol_errors() {
    let server = unconfigured_server();
    let input = [
        "not json",
        r#"{"jsonrpc":"2.0","id":1,"method":"resources/list"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"arguments":{}}}"#,
    ]
    .join("\n");

    let responses = exchange(&server, &input).await;
    assert_eq!(responses.len(), 3);

    let parse_error = responses.iter().find(|r| r["id"].is_null()).unwrap();
    assert_eq!(parse_error["error"]["code"], -32700);
    assert_eq!(by_id(&responses, 1)["error"]["code"], -32601);
    assert_eq!(by_id(&responses, 2)["error"]["code"], -32602);
}

#[tokio::test]
async fn test_notifications_and_blank_lines_get_no_reply() {
    let server = unconfigured_server();
    let input = "\n{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n\n\
                 {\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"ping\"}\n";

    let responses = exchange(&server, input).await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 3);
    assert_eq!(responses[0]["result"], json!({}));
}

#[tokio::test]
async fn test_pipelined_calls_all_answered() {
    let mut mock = MockGraphApi::new();
    mock.expect_list_joined_teams().returning(|| {
        Ok(vec![Team {
            display_name: Some("Ops".to_string()),
            ..Default::default()
        }])
    });
    let server = McpServer::new(Dispatcher::new(ClientFactory::with_client(
        Arc::new(mock) as Arc<dyn GraphApi>
    )));

    let input: String = (1..=5)
        .map(|id| {
            format!(
                "{{\"jsonrpc\":\"2.0\",\"id\":{id},\"method\":\"tools/call\",\"params\":{{\"name\":\"list_teams\"}}}}\n"
            )
        })
        .collect();

    let responses = exchange(&server, &input).await;
    assert_eq!(responses.len(), 5);
    for id in 1..=5 {
        let text = by_id(&responses, id)["result"]["content"][0]["text"]
            .as_str()
            .unwrap();
        assert!(text.starts_with("Microsoft Teams:\n\nTeam: Ops\n"));
    }
}

#[tokio::test]
async fn test_invalid_utf8_line_does_not_stop_server() {
    let server = unconfigured_server();
    let input = b"\xff\xfe garbage\n{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}\n";

    let responses = exchange_bytes(&server, input).await;
    assert_eq!(responses.len(), 2);

    let parse_error = responses.iter().find(|r| r["id"].is_null()).unwrap();
    assert_eq!(parse_error["error"]["code"], -32700);
    assert_eq!(by_id(&responses, 9)["result"], json!({}));
}

#[tokio::test]
async fn test_explicit_null_id_is_a_request() {
    let server = unconfigured_server();
    let responses = exchange(&server, r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).await;

    assert_eq!(responses.len(), 1);
    assert!(responses[0]["id"].is_null());
    assert!(responses[0].get("id").is_some());
    assert_eq!(responses[0]["result"], json!({}));
}
