//! Server Bootstrap
//!
//! Assembles the MCP server from the tool catalog. Assembly is
//! all-or-nothing: a duplicate name anywhere in the list fails the whole
//! build before any tool is registered.

use std::collections::HashSet;

use crate::application::catalog::alpaca_tools;
use crate::domain::tool::{RegistryError, Tool};
use crate::infrastructure::alpaca::SharedClient;
use crate::infrastructure::mcp::AlpacaMcpServer;

/// Identifier the MCP server advertises to clients.
pub const SERVER_NAME: &str = "alpaca-trading";

/// Build a server named `name` holding `tools` in order.
///
/// # Errors
///
/// Returns [`RegistryError::DuplicateTool`] naming the first repeated tool.
pub fn assemble(name: &str, tools: Vec<Tool>) -> Result<AlpacaMcpServer, RegistryError> {
    let mut seen = HashSet::with_capacity(tools.len());
    if let Some(dup) = tools.iter().find(|tool| !seen.insert(tool.name())) {
        return Err(RegistryError::DuplicateTool(dup.name().to_string()));
    }

    let mut server = AlpacaMcpServer::new(name);
    for tool in tools {
        server.collect(tool)?;
    }

    tracing::debug!(server = %name, tools = server.registry().len(), "Tools registered");
    Ok(server)
}

/// Build the `alpaca-trading` server with every Alpaca tool bound to `client`.
///
/// # Errors
///
/// Returns [`RegistryError`] if the catalog contains a duplicate name.
pub fn build_server(client: &SharedClient) -> Result<AlpacaMcpServer, RegistryError> {
    assemble(SERVER_NAME, alpaca_tools(client))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::tool::ToolError;
    use rmcp::schemars::{self, JsonSchema};

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Empty {}

    fn noop(name: &'static str) -> Tool {
        Tool::new(name, "No-op.", |_: Empty| async {
            Ok::<Value, ToolError>(json!(null))
        })
    }

    #[test]
    fn assemble_keeps_order() {
        let server = assemble("t", vec![noop("x"), noop("y")]).unwrap();
        assert_eq!(server.name(), "t");
        assert_eq!(server.registry().names(), vec!["x", "y"]);
    }

    #[test]
    fn duplicate_fails_whole_assembly() {
        let err = assemble("t", vec![noop("x"), noop("y"), noop("x")]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTool("x".to_string()));
    }

    #[test]
    fn empty_list_yields_empty_server() {
        let server = assemble("t", Vec::new()).unwrap();
        assert!(server.registry().is_empty());
    }
}
