//! Route definitions for the repocard web server

use crate::{handlers, AppState};
use axum::{routing::get, Router};

/// Create application routes
pub fn app_routes() -> Router<AppState> {
    Router::new()
        // Liveness
        .route("/", get(handlers::index))
        // Stats card
        .route("/repo", get(handlers::repo_stats_image))
}
