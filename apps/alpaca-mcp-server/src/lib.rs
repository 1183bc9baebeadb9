// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements,
        clippy::default_trait_access
    )
)]

//! Alpaca MCP Server - Trading Tools over MCP
//!
//! Exposes Alpaca trading and market data operations as MCP tools served
//! over Streamable HTTP under the server name `alpaca-trading`.
//!
//! # Architecture (Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Tools and the tool registry
//!   - `tool`: `Tool` (name, description, input schema, handler), `ToolRegistry`
//!
//! - **Application**: Catalog and assembly
//!   - `catalog`: The ordered list of Alpaca tools
//!   - `bootstrap`: Registers the catalog into the MCP server
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `alpaca`: REST client and gateway handlers
//!   - `mcp`: rmcp `ServerHandler` and Streamable HTTP transport
//!   - `config`: Environment configuration
//!   - `health`, `metrics`, `telemetry`: Operational endpoints and logging

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Hexagonal Layers
// =============================================================================

/// Domain layer - Tools and the registry, no transport knowledge.
pub mod domain;

/// Application layer - Tool catalog and server assembly.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::bootstrap::{SERVER_NAME, assemble, build_server};
pub use application::catalog::alpaca_tools;
pub use domain::tool::{JsonObject, RegistryError, Tool, ToolError, ToolRegistry};
pub use infrastructure::alpaca::{
    AlpacaConfig, AlpacaEnvironment, AlpacaError, AlpacaHttpClient, Credentials, SharedClient,
};
pub use infrastructure::config::{ConfigError, ServerConfig, ServerSettings};
pub use infrastructure::mcp::{AlpacaMcpServer, InvokeError, ServeError};
