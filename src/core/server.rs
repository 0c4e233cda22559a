//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per API
//! area. Each tool declares its schema and an invoke handler; the static
//! table in `domains/tools/loader.rs` assembles the registry this server
//! lists and dispatches against.
//!
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::tools::definitions::directstay::DsClient;
use crate::domains::tools::{
    Dispatcher, InboundCall, LoaderError, ProtocolError, ResponseEnvelope, ToolDescriptor,
    ToolRegistry, load_tools,
};

/// Guidance surfaced to clients during initialization.
const INSTRUCTIONS: &str = "This server provides tools for the DirectStay vacation rental \
     platform: property search, bookings, guest messaging, and AI phone agent flows \
     (caller identification, OTP verification, property comparisons, and call insights).";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// every tool call through the shared dispatcher, so both transports see
/// identical semantics.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools, in listing order.
    registry: Arc<ToolRegistry>,

    /// Dispatcher for handling tool calls.
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when the registration table contains an invalid descriptor;
    /// the server never starts with a partial tool set.
    pub fn new(config: Config) -> Result<Self, LoaderError> {
        let config = Arc::new(config);
        let client = DsClient::from_config(&config.api);
        let registry = load_tools(&client)?;

        Ok(Self::from_parts(config, registry))
    }

    /// Assemble a server from an already-built registry.
    pub fn from_parts(config: Arc<Config>, registry: ToolRegistry) -> Self {
        let registry = Arc::new(registry);

        Self {
            dispatcher: Dispatcher::new(registry.clone()),
            config,
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the initialization instructions.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// Get the registered tools.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// List all available tools as wire-shaped JSON (for the SSE transport).
    pub fn tool_listing(&self) -> Vec<serde_json::Value> {
        self.registry
            .list()
            .iter()
            .map(|descriptor| {
                serde_json::json!({
                    "name": descriptor.name,
                    "description": descriptor.description,
                    "inputSchema": descriptor.schema.to_json_object()
                })
            })
            .collect()
    }

    /// Dispatch a tool call (for the SSE transport).
    pub async fn dispatch(&self, call: InboundCall) -> Result<ResponseEnvelope, ProtocolError> {
        self.dispatcher.dispatch(call).await
    }
}

/// Convert a registered descriptor into the rmcp tool listing shape.
fn descriptor_to_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool {
        name: Cow::Borrowed(descriptor.name),
        title: None,
        description: Some(Cow::Borrowed(descriptor.description)),
        input_schema: Arc::new(descriptor.schema.to_json_object()),
        output_schema: None,
        annotations: None,
        icons: None,
        meta: None,
    }
}

/// Map a dispatch failure onto the matching JSON-RPC error.
fn dispatch_error(error: ProtocolError) -> McpError {
    match &error {
        ProtocolError::MethodNotFound(_) => {
            McpError::new(ErrorCode::METHOD_NOT_FOUND, error.to_string(), None)
        }
        ProtocolError::InvalidParams(_) => McpError::invalid_params(error.to_string(), None),
        ProtocolError::Internal(_) => McpError::internal_error(error.to_string(), None),
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::default()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        let tools = self.registry.list().iter().map(descriptor_to_tool).collect();
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context, request), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);

        let call = InboundCall {
            tool_name: request.name.to_string(),
            arguments: request.arguments.unwrap_or_default(),
        };

        let envelope = self.dispatcher.dispatch(call).await.map_err(dispatch_error)?;

        let content = envelope
            .content
            .iter()
            .map(|block| Content::text(block.text().to_string()))
            .collect();
        Ok(CallToolResult::success(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_loads_full_tool_set() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.registry().len(), 11);
        assert_eq!(server.name(), "ds-mcp-server");
    }

    #[test]
    fn test_tool_listing_shape() {
        let server = McpServer::new(Config::default()).unwrap();
        let listing = server.tool_listing();

        assert_eq!(listing.len(), 11);
        assert_eq!(listing[0]["name"], "create_booking");
        for entry in &listing {
            assert!(entry["name"].is_string());
            assert!(entry["description"].is_string());
            assert_eq!(entry["inputSchema"]["type"], "object");
            assert!(entry["inputSchema"]["required"].is_array());
        }
    }

    #[test]
    fn test_listing_preserves_original_schemas() {
        let server = McpServer::new(Config::default()).unwrap();
        let listing = server.tool_listing();

        let booking = listing
            .iter()
            .find(|entry| entry["name"] == "create_booking")
            .unwrap();
        assert_eq!(
            booking["inputSchema"]["required"],
            json!(["propertyId", "checkIn", "checkOut", "guests", "totalPrice"])
        );
        assert_eq!(
            booking["inputSchema"]["properties"]["notes"]["description"],
            "Optional notes for the booking."
        );
    }

    #[test]
    fn test_get_info_advertises_tools_only() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();

        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "ds-mcp-server");
        assert!(info.instructions.unwrap().contains("DirectStay"));
    }

    #[test]
    fn test_descriptor_conversion_keeps_schema() {
        let server = McpServer::new(Config::default()).unwrap();
        let descriptor = server.registry().find_by_name("verify_otp").unwrap();
        let tool = descriptor_to_tool(descriptor);

        assert_eq!(tool.name, "verify_otp");
        assert_eq!(
            tool.description.as_deref(),
            Some("Verify OTP for a user and retrieve user data.")
        );
        assert!(tool.input_schema.contains_key("properties"));
    }
}
