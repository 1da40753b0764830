//! Repository stats resolver
//!
//! Orchestrates the commit lookup, cache check, working-copy refresh, and
//! statistics recomputation described in the crate docs.

use crate::api::{ApiClientConfig, CommitApi, GitHubCommitClient};
use crate::cache::{cache_key, StatsCache};
use crate::git::{GitWorkspace, Vcs};
use crate::walker::compute_tree_stats;
use repocard_core::{CardConfig, CardError, CardResult, ErrorContext, RepoRef, RepoStats};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Resolves repository statistics with commit-keyed caching.
///
/// Cache validity is decided by comparing the current *remote* commit against
/// the *cached* commit; the local working copy's HEAD is read and logged but
/// never consulted for that decision.
pub struct StatsResolver {
    code_extensions: HashSet<String>,
    api: Arc<dyn CommitApi>,
    vcs: Arc<dyn Vcs>,
    cache: StatsCache,
    /// Per-repository locks serializing clone/fetch and cache writes, keyed
    /// by the sanitized URL.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl StatsResolver {
    /// Create a resolver backed by the GitHub API and the system git binary
    pub fn new(config: &CardConfig) -> CardResult<Self> {
        let api_config =
            ApiClientConfig::github().with_timeout(config.stats.api_timeout_secs);
        let api = Arc::new(GitHubCommitClient::new(api_config)?);
        let vcs = Arc::new(GitWorkspace::new(
            &config.storage.repos_dir,
            config.stats.clone_depth,
        ));
        let cache = StatsCache::with_cache_dir(&config.storage.cache_dir);

        Ok(Self::with_components(
            config.stats.code_extensions.iter().cloned().collect(),
            api,
            vcs,
            cache,
        ))
    }

    /// Create a resolver from explicit components (used by tests)
    pub fn with_components(
        code_extensions: HashSet<String>,
        api: Arc<dyn CommitApi>,
        vcs: Arc<dyn Vcs>,
        cache: StatsCache,
    ) -> Self {
        let code_extensions = code_extensions
            .into_iter()
            .map(|ext| ext.to_ascii_lowercase())
            .collect();

        Self {
            code_extensions,
            api,
            vcs,
            cache,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve current statistics for a repository URL.
    ///
    /// Returns the cached snapshot verbatim when the remote commit has not
    /// moved; otherwise refreshes the working copy, recomputes, and persists
    /// a new snapshot tagged with the remote commit.
    pub async fn resolve(&self, repo_url: &str) -> CardResult<RepoStats> {
        let repo = RepoRef::parse(repo_url)?;

        let remote_commit = self.api.latest_commit(&repo).await?;

        if let Some(cached) = self.cache.load(repo_url).await? {
            if cached.commit == remote_commit {
                debug!(
                    repo = %repo,
                    commit = %remote_commit,
                    "Cache hit, returning stored stats"
                );
                return Ok(cached);
            }
            debug!(
                repo = %repo,
                cached_commit = %cached.commit,
                remote_commit = %remote_commit,
                "Cache stale, recomputing"
            );
        }

        let lock = self.repo_lock(&cache_key(repo_url)).await;
        let _guard = lock.lock().await;

        let working_copy = self.vcs.ensure_working_copy(&repo, repo_url).await?;

        // The local HEAD is informational only; the remote commit is what the
        // cache is keyed on.
        let local_commit = self.vcs.local_commit(&working_copy).await?;
        debug!(repo = %repo, local_commit = %local_commit, "Working copy HEAD");

        let extensions = self.code_extensions.clone();
        let tree = tokio::task::spawn_blocking(move || {
            compute_tree_stats(&working_copy, &extensions)
        })
        .await
        .map_err(|e| CardError::Internal {
            message: format!("Stats computation task failed: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("stats_resolver").with_operation("resolve"),
        })??;

        let stats = RepoStats {
            commit: remote_commit,
            repository: repo_url.to_string(),
            total_files: tree.total_files,
            code_files: tree.code_files,
            size_bytes: tree.size_bytes,
            total_lines: tree.total_lines,
        };

        self.cache.store(repo_url, &stats).await?;

        info!(
            repo = %repo,
            commit = %stats.commit,
            total_files = stats.total_files,
            code_files = stats.code_files,
            "Computed repository stats"
        );

        Ok(stats)
    }

    /// Get or create the lock for a repository key
    async fn repo_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
