//! Infrastructure Layer - Adapters
//!
//! - `alpaca`: REST client and per-tool gateway handlers
//! - `config`: Environment-driven server configuration
//! - `mcp`: MCP server handler and Streamable HTTP transport
//! - `health`: Health, readiness and metrics routes
//! - `metrics`: Prometheus recorder and tool call metrics
//! - `telemetry`: Tracing subscriber and optional OTLP export

pub mod alpaca;
pub mod config;
pub mod health;
pub mod mcp;
pub mod metrics;
pub mod telemetry;
