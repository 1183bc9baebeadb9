//! MCP Server
//!
//! Holds the tool registry and answers MCP `tools/list` and `tools/call`
//! requests from it. The server is assembled with [`AlpacaMcpServer::collect`]
//! and then frozen; every MCP session gets a cheap clone sharing the same
//! registry.

use std::sync::Arc;
use std::time::Instant;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool as McpTool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use thiserror::Error;

use crate::domain::tool::{JsonObject, RegistryError, Tool, ToolError, ToolRegistry};
use crate::infrastructure::metrics::{self, CallOutcome};

/// Failure to dispatch a tool call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// No tool is registered under this name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// The tool ran and failed.
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// MCP server exposing the registered tools.
#[derive(Debug, Clone)]
pub struct AlpacaMcpServer {
    name: String,
    registry: Arc<ToolRegistry>,
}

impl AlpacaMcpServer {
    /// Create an empty server with the given identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: Arc::new(ToolRegistry::new()),
        }
    }

    /// Register a tool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTool`] if the name is taken.
    pub fn collect(&mut self, tool: Tool) -> Result<(), RegistryError> {
        Arc::make_mut(&mut self.registry).register(tool)
    }

    /// Server identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered tools.
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch a call to the named tool.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::UnknownTool`] for unregistered names and
    /// [`InvokeError::Tool`] when the handler fails.
    pub async fn invoke(&self, name: &str, args: JsonObject) -> Result<Value, InvokeError> {
        let started = Instant::now();

        let Some(tool) = self.registry.get(name) else {
            metrics::record_tool_call(
                metrics::UNKNOWN_TOOL_LABEL,
                CallOutcome::UnknownTool,
                started.elapsed(),
            );
            tracing::warn!(tool = %name, "Unknown tool requested");
            return Err(InvokeError::UnknownTool(name.to_string()));
        };

        let name = tool.name();
        let result = tool.call(args).await;
        let elapsed = started.elapsed();

        match &result {
            Ok(_) => {
                metrics::record_tool_call(name, CallOutcome::Success, elapsed);
                tracing::info!(
                    tool = %name,
                    elapsed_ms = elapsed.as_millis(),
                    "Tool call succeeded"
                );
            }
            Err(err) => {
                let outcome = match err {
                    ToolError::InvalidArguments(_) | ToolError::Validation(_) => {
                        CallOutcome::InvalidArguments
                    }
                    ToolError::Upstream(_) => CallOutcome::UpstreamError,
                };
                metrics::record_tool_call(name, outcome, elapsed);
                tracing::warn!(
                    tool = %name,
                    code = err.code(),
                    error = %err,
                    elapsed_ms = elapsed.as_millis(),
                    "Tool call failed"
                );
            }
        }

        result.map_err(InvokeError::from)
    }

    fn mcp_tools(&self) -> Vec<McpTool> {
        self.registry
            .iter()
            .map(|tool| McpTool::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }
}

impl ServerHandler for AlpacaMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Alpaca trading and market data tools: account, positions, orders, \
                 watchlists, assets, calendar, and stock/crypto/option market data."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.mcp_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        match self.invoke(&request.name, args).await {
            Ok(value) => Ok(CallToolResult::success(vec![Content::text(render(&value))])),
            Err(InvokeError::UnknownTool(name)) => Err(McpError::invalid_params(
                format!("unknown tool: {name}"),
                None,
            )),
            Err(InvokeError::Tool(err)) => Ok(CallToolResult::error(vec![Content::text(
                err.to_string(),
            )])),
        }
    }
}

/// Pretty-printed JSON for the text content block.
fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::domain::tool::Tool;
    use rmcp::schemars::{self, JsonSchema};

    #[derive(Deserialize, JsonSchema)]
    struct EchoParams {
        text: String,
    }

    fn echo_tool(name: &'static str) -> Tool {
        Tool::new(name, "Echo the text back.", |p: EchoParams| async move {
            Ok::<_, ToolError>(json!({ "echo": p.text }))
        })
    }

    fn failing_tool() -> Tool {
        Tool::new("fail", "Always fails.", |_: EchoParams| async move {
            Err::<Value, _>(ToolError::Upstream("boom".to_string()))
        })
    }

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => JsonObject::new(),
        }
    }

    #[test]
    fn collect_rejects_duplicates() {
        let mut server = AlpacaMcpServer::new("test");
        server.collect(echo_tool("echo")).unwrap();
        assert_eq!(
            server.collect(echo_tool("echo")),
            Err(RegistryError::DuplicateTool("echo".to_string()))
        );
        assert_eq!(server.registry().len(), 1);
    }

    #[test]
    fn clones_share_the_registry() {
        let mut server = AlpacaMcpServer::new("test");
        server.collect(echo_tool("echo")).unwrap();
        let clone = server.clone();
        assert!(Arc::ptr_eq(&server.registry, &clone.registry));
    }

    #[test]
    fn info_carries_name_and_tools_capability() {
        let info = AlpacaMcpServer::new("alpaca-trading").get_info();
        assert_eq!(info.server_info.name, "alpaca-trading");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn mcp_tools_preserve_order_and_metadata() {
        let mut server = AlpacaMcpServer::new("test");
        server.collect(echo_tool("b")).unwrap();
        server.collect(echo_tool("a")).unwrap();
        let tools = server.mcp_tools();
        assert_eq!(tools[0].name, "b");
        assert_eq!(tools[1].name, "a");
        assert_eq!(tools[0].description.as_deref(), Some("Echo the text back."));
    }

    #[tokio::test]
    async fn invoke_dispatches() {
        let mut server = AlpacaMcpServer::new("test");
        server.collect(echo_tool("echo")).unwrap();
        let out = server
            .invoke("echo", args(json!({ "text": "hi" })))
            .await
            .unwrap();
        assert_eq!(out, json!({ "echo": "hi" }));
    }

    #[tokio::test]
    async fn invoke_unknown_tool() {
        let server = AlpacaMcpServer::new("test");
        assert_eq!(
            server.invoke("missing", JsonObject::new()).await,
            Err(InvokeError::UnknownTool("missing".to_string()))
        );
    }

    #[test]
    fn unknown_tool_names_share_one_series() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let mut server = AlpacaMcpServer::new("test");
        server.collect(echo_tool("echo")).unwrap();

        ::metrics::with_local_recorder(&recorder, || {
            futures::executor::block_on(async {
                for i in 0..50 {
                    let name = format!("bogus_{i}");
                    assert!(server.invoke(&name, JsonObject::new()).await.is_err());
                }
                server
                    .invoke("echo", args(json!({ "text": "hi" })))
                    .await
                    .unwrap();
            });
        });

        let rendered = handle.render();
        let series = rendered
            .lines()
            .filter(|line| line.starts_with("alpaca_mcp_tool_calls_total{"))
            .count();
        assert_eq!(series, 2);
        assert!(rendered.contains(r#"tool="unknown""#));
        assert!(rendered.contains(r#"tool="echo""#));
        assert!(!rendered.contains("bogus_"));
    }

    #[tokio::test]
    async fn invoke_reports_handler_errors() {
        let mut server = AlpacaMcpServer::new("test");
        server.collect(echo_tool("echo")).unwrap();
        server.collect(failing_tool()).unwrap();

        assert!(matches!(
            server.invoke("echo", JsonObject::new()).await,
            Err(InvokeError::Tool(ToolError::InvalidArguments(_)))
        ));
        assert_eq!(
            server.invoke("fail", args(json!({ "text": "x" }))).await,
            Err(InvokeError::Tool(ToolError::Upstream("boom".to_string())))
        );
    }
}
