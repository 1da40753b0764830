//! Request handlers

use crate::{render, AppState};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

/// Query parameters for the stats card endpoint
#[derive(Debug, Deserialize)]
pub struct RepoQuery {
    pub repo: Option<String>,
}

/// Liveness endpoint reporting the current timestamp
pub async fn index() -> String {
    format!("[{}] repocard server is up", chrono::Utc::now().to_rfc3339())
}

/// First 8 hex characters of the md5 of a URL, used in the response filename
pub fn md5_fragment(url: &str) -> String {
    let digest = format!("{:x}", md5::compute(url));
    digest[..8].to_string()
}

/// Serve a rendered statistics card for the requested repository
pub async fn repo_stats_image(
    State(state): State<AppState>,
    Query(query): Query<RepoQuery>,
) -> Response {
    // An empty parameter is treated like an absent one.
    let Some(repo_url) = query.repo.filter(|r| !r.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "missing `repo` query parameter"})),
        )
            .into_response();
    };

    info!(repo_url = %repo_url, "Stats card requested");

    let stats = match state.resolver.resolve(&repo_url).await {
        Ok(stats) => stats,
        Err(e) => {
            e.log();
            return internal_error();
        }
    };

    let render_config = state.render.clone();
    let png = match tokio::task::spawn_blocking(move || {
        render::render_stats_card(&stats, &render_config)
    })
    .await
    {
        Ok(Ok(png)) => png,
        Ok(Err(e)) => {
            e.log();
            return internal_error();
        }
        Err(e) => {
            error!(error = %e, "Render task failed");
            return internal_error();
        }
    };

    let disposition = format!("inline; filename=stats_{}.png", md5_fragment(&repo_url));

    (
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        png,
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "failed to collect repository statistics"})),
    )
        .into_response()
}
