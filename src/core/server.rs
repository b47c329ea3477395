//! MCP Server implementation and lifecycle management.
//!
//! `McpServer` is the MCP façade: `tools/list` renders the operation
//! registry and `tools/call` goes through the shared `Dispatcher`. The HTTP
//! transport and the REST API reuse the same dispatcher, so every entry
//! point sees identical validation and error classification.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::holded::{HoldedApi, HoldedClient};
use crate::domains::tools::{Arguments, DispatchError, Dispatcher, OperationRegistry};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared dispatch path for every operation.
    dispatcher: Arc<Dispatcher>,
}

impl McpServer {
    /// Create a server backed by the real Holded client.
    ///
    /// Fails when the API key is missing or the client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let api_key = config.credentials.api_key()?;
        let client = HoldedClient::new(api_key, &config.holded)?;
        info!("Holded client ready for {}", client.base_url());
        Self::with_api(config, Arc::new(client))
    }

    /// Create a server backed by any `HoldedApi` implementation.
    pub fn with_api(config: Config, api: Arc<dyn HoldedApi>) -> Result<Self> {
        let registry = Arc::new(OperationRegistry::builtin()?);
        info!("Registered {} operations", registry.len());
        Ok(Self {
            config: Arc::new(config),
            dispatcher: Arc::new(Dispatcher::new(registry, api)),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Value> {
        self.dispatcher
            .registry()
            .tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Returns the MCP `CallToolResult` body on success.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> std::result::Result<Value, DispatchError> {
        let payload = self.dispatcher.dispatch_json(name, arguments).await?;
        serde_json::to_value(tool_result(payload))
            .map_err(|e| DispatchError::internal(e.to_string()))
    }
}

/// Wrap an API payload as a successful tool result: pretty JSON text, plus
/// structured content when the payload is an object.
pub fn tool_result(payload: Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
    let mut result = CallToolResult::success(vec![Content::text(text)]);
    if payload.is_object() {
        result.structured_content = Some(payload);
    }
    result
}

/// Map a failed dispatch onto a JSON-RPC error.
pub fn to_mcp_error(err: &DispatchError) -> McpError {
    err.log("mcp");
    McpError::new(
        ErrorCode(err.rpc_code()),
        err.public_message(),
        Some(err.details()),
    )
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Holded invoicing and CRM. Tools cover contacts, products, services, \
                 bookings and documents (invoices, estimates, purchase orders and more)."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.dispatcher.registry().tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments: Arguments = request.arguments.unwrap_or_default();
        self.dispatcher
            .dispatch(&request.name, arguments)
            .await
            .map(tool_result)
            .map_err(|e| to_mcp_error(&e))
    }
}
