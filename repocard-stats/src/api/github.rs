//! GitHub commits API client

use async_trait::async_trait;
use repocard_core::{CardError, CardResult, ErrorContext, RepoRef};
use serde::Deserialize;
use tracing::debug;

use super::{create_http_client, handle_response_error, ApiClientConfig, CommitApi};

/// GitHub API client for commit lookup
pub struct GitHubCommitClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

/// One entry of the GitHub commits listing
#[derive(Debug, Deserialize)]
struct GitHubCommit {
    sha: String,
}

impl GitHubCommitClient {
    /// Create a new GitHub API client
    pub fn new(config: ApiClientConfig) -> CardResult<Self> {
        let client = create_http_client(&config)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CommitApi for GitHubCommitClient {
    async fn latest_commit(&self, repo: &RepoRef) -> CardResult<String> {
        let url = format!(
            "{}/repos/{}/{}/commits",
            self.config.base_url.trim_end_matches('/'),
            repo.owner,
            repo.name
        );

        debug!(url = %url, "Fetching latest commit from GitHub");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
            .query(&[("per_page", "1")])
            .send()
            .await
            .map_err(|e| CardError::RemoteUnavailable {
                message: format!("Failed to reach GitHub API: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("latest_commit"),
            })?;

        if !response.status().is_success() {
            return Err(handle_response_error(response, "latest_commit").await);
        }

        let commits: Vec<GitHubCommit> =
            response
                .json()
                .await
                .map_err(|e| CardError::RemoteUnavailable {
                    message: format!("Failed to parse commits response: {}", e),
                    source: Some(Box::new(e)),
                    context: ErrorContext::new("github_api_client")
                        .with_operation("latest_commit"),
                })?;

        let latest = commits
            .into_iter()
            .next()
            .ok_or_else(|| CardError::RemoteUnavailable {
                message: format!("Repository {} has no commits", repo),
                source: None,
                context: ErrorContext::new("github_api_client")
                    .with_operation("latest_commit")
                    .with_suggestion("The repository may be empty"),
            })?;

        debug!(repo = %repo, sha = %latest.sha, "Resolved latest remote commit");
        Ok(latest.sha)
    }
}
