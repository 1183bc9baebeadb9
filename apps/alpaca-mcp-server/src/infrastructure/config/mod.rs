//! Configuration Module
//!
//! Environment-driven settings for the Alpaca client and the MCP listener.

mod settings;

pub use settings::{ConfigError, ServerConfig, ServerSettings};
