//! JSON-RPC message types and method dispatch.
//!
//! The SSE transport carries MCP as raw JSON-RPC 2.0: requests arrive over
//! POST and responses are pushed down the event stream. This module owns the
//! wire structures and the method routing shared by that path.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::core::McpServer;
use crate::domains::tools::{InboundCall, JsonObject};

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }
}

/// Process a JSON-RPC request and return the response.
///
/// Notifications produce `None`: per JSON-RPC they never receive a reply,
/// so they are recognized before any validation can fail one.
pub async fn process_request(server: &McpServer, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if request.method.starts_with("notifications/") {
        info!("Received notification: {}", request.method);
        return None;
    }

    // Validate JSON-RPC version
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(request.id));
    }

    Some(match request.method.as_str() {
        // Initialize the MCP session
        "initialize" => handle_initialize(server, request).await,

        // Liveness probe
        "ping" => handle_ping(request).await,

        // List available tools
        "tools/list" => handle_tools_list(server, request).await,

        // Call a tool
        "tools/call" => handle_tools_call(server, request).await,

        // Unknown method
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    })
}

/// Handle initialize request.
async fn handle_initialize(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing initialize request");

    let result = json!({
        "protocolVersion": "2024-11-05",
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        },
        "instructions": server.instructions()
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle ping request.
async fn handle_ping(request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing ping request");

    JsonRpcResponse::success(request.id, json!({}))
}

/// Handle tools/list request.
async fn handle_tools_list(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    let tools = server.tool_listing();
    let result = json!({
        "tools": tools
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/call request.
async fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/call request");

    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing tool name"),
    };

    let arguments = match params.get("arguments") {
        None | Some(serde_json::Value::Null) => JsonObject::new(),
        Some(serde_json::Value::Object(map)) => map.clone(),
        Some(_) => {
            return JsonRpcResponse::invalid_params(
                request.id.clone(),
                "Tool arguments must be an object",
            );
        }
    };

    let call = InboundCall {
        tool_name: name,
        arguments,
    };

    match server.dispatch(call).await {
        Ok(envelope) => match serde_json::to_value(&envelope) {
            Ok(result) => JsonRpcResponse::success(request.id, result),
            Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
        },
        Err(e) => JsonRpcResponse::error(request.id, e.json_rpc_code(), e.to_string()),
    }
}
