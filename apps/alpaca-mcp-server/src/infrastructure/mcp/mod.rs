//! MCP Adapter
//!
//! rmcp `ServerHandler` over the tool registry, served over Streamable HTTP.

mod server;
mod transport;

pub use server::{AlpacaMcpServer, InvokeError};
pub use transport::{ServeError, router, serve};

use tokio_util::sync::CancellationToken;

use crate::infrastructure::config::ServerSettings;

impl AlpacaMcpServer {
    /// Serve this server over Streamable HTTP until `shutdown` is cancelled.
    ///
    /// # Errors
    ///
    /// See [`serve`].
    pub async fn serve(
        self,
        settings: ServerSettings,
        environment: &str,
        shutdown: CancellationToken,
    ) -> Result<(), ServeError> {
        transport::serve(self, settings, environment, shutdown).await
    }
}
