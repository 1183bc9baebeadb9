//! Alpaca REST Adapter
//!
//! HTTP client, configuration and per-tool gateway handlers for Alpaca's
//! trading and market data APIs.

mod config;
mod error;
pub mod gateway;
mod http_client;
mod query;

pub use config::{
    AlpacaConfig, AlpacaEnvironment, Credentials, DEFAULT_DATA_BASE_URL, DEFAULT_TIMEOUT,
};
pub use error::AlpacaError;
pub use gateway::SharedClient;
pub use http_client::{AlpacaHttpClient, Api};
pub use query::Query;
