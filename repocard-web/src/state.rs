//! Application state shared across request handlers

use crate::{WebConfig, WebError, WebResult};
use repocard_core::{CardConfig, RenderConfig};
use repocard_stats::StatsResolver;
use std::sync::Arc;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Web server configuration
    pub config: WebConfig,
    /// Render settings for stats cards
    pub render: RenderConfig,
    /// Repository stats resolver
    pub resolver: Arc<StatsResolver>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: WebConfig, card_config: CardConfig) -> WebResult<Self> {
        card_config
            .validate()
            .map_err(|e| WebError::Config(format!("Invalid configuration: {}", e)))?;

        let resolver = StatsResolver::new(&card_config)
            .map_err(|e| WebError::Config(format!("Failed to create resolver: {}", e)))?;

        info!(
            repos_dir = %card_config.storage.repos_dir.display(),
            cache_dir = %card_config.storage.cache_dir.display(),
            "Application state initialized"
        );

        Ok(Self {
            config,
            render: card_config.render,
            resolver: Arc::new(resolver),
        })
    }
}
