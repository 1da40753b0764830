//! API client for looking up commits on remote hosting platforms
//!
//! Only the latest-commit lookup is needed here; everything else about a
//! repository is read from the local working copy.

use async_trait::async_trait;
use repocard_core::{CardError, CardResult, ErrorContext, RepoRef};

pub mod github;


pub use github::GitHubCommitClient;

/// Configuration for API clients
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_seconds: 10,
            user_agent: "repocard/0.1".to_string(),
        }
    }
}

impl ApiClientConfig {
    /// Create a new configuration for GitHub
    pub fn github() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            ..Default::default()
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Trait for remote commit lookup
///
/// The resolver depends on this seam rather than a concrete client so that
/// cache behavior can be tested without touching the network.
#[async_trait]
pub trait CommitApi: Send + Sync {
    /// Latest commit id on the repository's default branch
    async fn latest_commit(&self, repo: &RepoRef) -> CardResult<String>;
}

/// Helper function to create an HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> CardResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            CardError::RemoteUnavailable {
                message: format!("Invalid user agent: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?,
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| CardError::RemoteUnavailable {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client").with_operation("create_client"),
        })?;

    Ok(client)
}

/// Helper function to turn a non-success HTTP response into an error
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    operation: &str,
) -> CardError {
    let status = response.status();
    let url = response.url().clone();

    let error_body = response.text().await.unwrap_or_default();

    CardError::RemoteUnavailable {
        message: format!(
            "HTTP {} error for {}: {}",
            status.as_u16(),
            url,
            if error_body.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error")
            } else {
                &error_body
            }
        ),
        source: None,
        context: ErrorContext::new("api_client")
            .with_operation(operation)
            .with_suggestion(match status.as_u16() {
                403 => "Check API rate limits",
                404 => "Repository not found or not accessible",
                _ => "Check network connectivity and API status",
            }),
    }
}
