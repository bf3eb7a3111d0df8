//! HTTP API for the editor front-end

pub mod handlers;
pub mod router;

use std::sync::Arc;

use patchbay_oracle::Validator;

/// Server configuration.
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Shared state handed to every handler.
pub struct ServerState {
    /// The injected validation oracle; one per server, reused across calls.
    pub validator: Box<dyn Validator>,
}

impl ServerState {
    pub fn new(validator: Box<dyn Validator>) -> Self {
        Self { validator }
    }
}

/// The Patchbay API server.
pub struct PatchbayServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl PatchbayServer {
    pub fn new(validator: Box<dyn Validator>, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(ServerState::new(validator)),
            config,
        }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(&self) -> anyhow::Result<()> {
        let app = router::create_router(self.state());
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!("Patchbay API listening on http://{}", addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
