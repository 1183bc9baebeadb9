//! Alpaca MCP Server Binary
//!
//! Registers the Alpaca tools and serves them over MCP Streamable HTTP.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin alpaca-mcp-server
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `ALPACA_API_KEY`: Broker API key
//! - `ALPACA_SECRET_KEY`: Broker API secret
//!
//! ## Optional
//! - `ALPACA_PAPER_TRADE`: Use paper trading (default: true)
//! - `TRADE_API_URL` / `DATA_API_URL`: Base URL overrides
//! - `ALPACA_HTTP_TIMEOUT_SECS`: Upstream request timeout (default: 30)
//! - `MCP_HOST`: Bind host (default: 127.0.0.1)
//! - `MCP_PORT`: Bind port (default: 8000)
//! - `MCP_PATH`: MCP endpoint path (default: /mcp)
//! - `MCP_SSE_KEEP_ALIVE_SECS`: SSE keep-alive, 0 disables (default: 15)
//! - `OTEL_ENABLED`: Export spans over OTLP (default: false)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use alpaca_mcp_server::infrastructure::metrics::init_metrics;
use alpaca_mcp_server::infrastructure::telemetry;
use alpaca_mcp_server::{AlpacaHttpClient, ServerConfig, build_server};
use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    let _telemetry = telemetry::init().context("failed to initialize telemetry")?;

    tracing::info!("Starting Alpaca MCP server");

    if let Err(e) = init_metrics() {
        tracing::warn!(error = %e, "Failed to install metrics recorder, continuing without it");
    }

    let config = ServerConfig::from_env().context("invalid configuration")?;
    let environment = config.alpaca.environment.to_string();
    tracing::info!(
        environment = %environment,
        trading_url = %config.alpaca.trading_base_url(),
        data_url = %config.alpaca.data_base_url(),
        "Alpaca configuration loaded"
    );

    let client = Arc::new(
        AlpacaHttpClient::new(&config.alpaca).context("failed to create Alpaca client")?,
    );
    let server = build_server(&client).context("failed to register tools")?;

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    server
        .serve(config.server, &environment, shutdown)
        .await
        .context("MCP server failed")?;

    tracing::info!("Alpaca MCP server stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Cancel `shutdown` on Ctrl+C or SIGTERM.
#[allow(clippy::expect_used)]
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown.cancel();
}
