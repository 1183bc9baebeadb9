//! Streamable HTTP Transport
//!
//! Mounts the MCP endpoint and the health routes on one axum router and
//! serves it until the shutdown token is cancelled.

use std::sync::Arc;

use axum::Router;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use super::AlpacaMcpServer;
use crate::infrastructure::config::{ConfigError, ServerSettings};
use crate::infrastructure::health::{self, HealthState};
use crate::infrastructure::metrics;

/// Errors from running the HTTP listener.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Listener settings are unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to bind the listener.
    #[error("failed to bind to {addr}: {message}")]
    BindFailed {
        /// Address that could not be bound.
        addr: String,
        /// Underlying error.
        message: String,
    },

    /// Server error while running.
    #[error("server error: {0}")]
    ServerFailed(String),
}

/// Build the HTTP surface: MCP endpoint at `settings.path` plus health routes.
pub fn router(server: AlpacaMcpServer, settings: &ServerSettings, environment: &str) -> Router {
    let health_state = Arc::new(HealthState::new(
        server.name(),
        environment,
        server.registry().len(),
    ));

    let config = StreamableHttpServerConfig {
        sse_keep_alive: settings.sse_keep_alive,
        stateful_mode: true,
        ..Default::default()
    };
    let mcp_service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        config,
    );

    let router = if settings.path == "/" {
        Router::new().fallback_service(mcp_service)
    } else {
        Router::new().nest_service(&settings.path, mcp_service)
    };
    router.merge(health::routes(health_state))
}

/// Serve until `shutdown` is cancelled.
///
/// # Errors
///
/// Returns `ServeError` if the address is invalid, binding fails or the
/// server stops with an error.
pub async fn serve(
    server: AlpacaMcpServer,
    settings: ServerSettings,
    environment: &str,
    shutdown: CancellationToken,
) -> Result<(), ServeError> {
    let addr = settings.bind_addr()?;
    metrics::set_registered_tools(server.registry().len());

    let tool_count = server.registry().len();
    let app = router(server, &settings, environment);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServeError::BindFailed {
            addr: addr.to_string(),
            message: e.to_string(),
        })?;

    tracing::info!(
        addr = %addr,
        path = %settings.path,
        tools = tool_count,
        "MCP server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| ServeError::ServerFailed(e.to_string()))?;

    tracing::info!("MCP server stopped");
    Ok(())
}
