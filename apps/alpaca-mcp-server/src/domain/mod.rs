//! Domain Layer
//!
//! Tool definitions and the registry, with no knowledge of the brokerage
//! API or the MCP transport.

/// Tools, handlers and the tool registry.
pub mod tool;
