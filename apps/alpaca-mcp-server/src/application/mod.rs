//! Application Layer - Tool catalog and server assembly
//!
//! Binds the Alpaca gateway handlers to tool names and descriptions, and
//! assembles them into the MCP server exactly once at startup.

pub mod bootstrap;
pub mod catalog;
