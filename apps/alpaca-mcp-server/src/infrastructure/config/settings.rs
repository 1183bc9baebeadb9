//! Server Configuration Settings
//!
//! Configuration types for the MCP server, loaded from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use crate::infrastructure::alpaca::{AlpacaConfig, AlpacaEnvironment, Credentials, DEFAULT_TIMEOUT};

/// MCP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Path the MCP endpoint is mounted at.
    pub path: String,
    /// SSE keep-alive interval (`None` disables keep-alive pings).
    pub sse_keep_alive: Option<Duration>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            path: "/mcp".to_string(),
            sse_keep_alive: Some(Duration::from_secs(15)),
        }
    }
}

impl ServerSettings {
    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "MCP_HOST".to_string(),
                value: self.host.clone(),
            })
    }
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Alpaca client configuration.
    pub alpaca: AlpacaConfig,
    /// MCP listener settings.
    pub server: ServerSettings,
}

impl ServerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or empty, or if
    /// `MCP_PATH` does not start with `/`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required(&lookup, "ALPACA_API_KEY")?;
        let api_secret = required(&lookup, "ALPACA_SECRET_KEY")?;

        let paper = lookup("ALPACA_PAPER_TRADE").map_or(true, |v| parse_bool(&v));
        let environment = AlpacaEnvironment::from_paper_flag(paper);

        let mut alpaca = AlpacaConfig::new(Credentials::new(api_key, api_secret), environment)
            .with_timeout(parse_env_duration_secs(
                &lookup,
                "ALPACA_HTTP_TIMEOUT_SECS",
                DEFAULT_TIMEOUT,
            ));
        let trading_url = optional(&lookup, "TRADE_API_URL");
        let data_url = optional(&lookup, "DATA_API_URL");
        if trading_url.is_some() || data_url.is_some() {
            let trading = trading_url.unwrap_or_else(|| alpaca.trading_base_url().to_string());
            let data = data_url.unwrap_or_else(|| alpaca.data_base_url().to_string());
            alpaca = alpaca.with_base_urls(trading, data);
        }

        let defaults = ServerSettings::default();
        let path = optional(&lookup, "MCP_PATH").unwrap_or(defaults.path);
        if !path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                key: "MCP_PATH".to_string(),
                value: path,
            });
        }
        let keep_alive_secs = parse_env_u64(
            &lookup,
            "MCP_SSE_KEEP_ALIVE_SECS",
            defaults.sse_keep_alive.map_or(0, |d| d.as_secs()),
        );

        let server = ServerSettings {
            host: optional(&lookup, "MCP_HOST").unwrap_or(defaults.host),
            port: parse_env_u16(&lookup, "MCP_PORT", defaults.port),
            path,
            sse_keep_alive: (keep_alive_secs > 0).then(|| Duration::from_secs(keep_alive_secs)),
        };

        Ok(Self { alpaca, server })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable has an unusable value.
    #[error("environment variable {key} has invalid value '{value}'")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue(key.to_string()));
    }
    Ok(value.trim().to_string())
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn parse_env_u16<F>(lookup: &F, key: &str, default: u16) -> u16
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_env_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_env_duration_secs<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map_or(default, Duration::from_secs)
}
