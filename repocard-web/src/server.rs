//! Repocard Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use repocard_core::CardConfig;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main repocard web server
pub struct CardServer {
    config: WebConfig,
    state: AppState,
}

impl CardServer {
    /// Create a new server
    pub fn new(config: WebConfig, card_config: CardConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone(), card_config)?;
        Ok(Self { config, state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("Starting repocard web server");
        info!(address = %address, dev_mode = self.config.dev_mode, "Server configuration");

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app).await {
            error!(error = %e, "Server error");
            return Err(WebError::Server(e));
        }

        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Builder for CardServer
pub struct CardServerBuilder {
    config: WebConfig,
    card_config: CardConfig,
}

impl CardServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
            card_config: CardConfig::default(),
        }
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable development mode
    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.config.dev_mode = dev_mode;
        self
    }

    /// Set the service configuration (storage, stats, render)
    pub fn card_config(mut self, card_config: CardConfig) -> Self {
        self.card_config = card_config;
        self
    }

    /// Build the server
    pub fn build(self) -> WebResult<CardServer> {
        CardServer::new(self.config, self.card_config)
    }
}

impl Default for CardServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
