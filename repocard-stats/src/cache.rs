//! Stats cache management
//!
//! One JSON file per repository URL, tagged with the remote commit the stats
//! were computed for. Entries are overwritten when the remote commit changes
//! and never expire on their own.

use repocard_core::{CardError, CardResult, ErrorContext, RepoStats};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Filesystem-safe encoding of a repository URL, used as the cache file stem
/// and as the per-repository lock key.
pub fn cache_key(repo_url: &str) -> String {
    repo_url.replace(['/', ':'], "_")
}

/// Cache manager for computed repository statistics
pub struct StatsCache {
    cache_dir: PathBuf,
}

impl StatsCache {
    /// Create a StatsCache rooted at the given directory
    pub fn with_cache_dir<P: AsRef<Path>>(cache_dir: P) -> Self {
        Self {
            cache_dir: cache_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the cache file for a repository URL
    pub fn cache_path(&self, repo_url: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", cache_key(repo_url)))
    }

    /// Load the cache entry for a repository URL, if one exists
    pub async fn load(&self, repo_url: &str) -> CardResult<Option<RepoStats>> {
        let cache_file = self.cache_path(repo_url);

        if !cache_file.exists() {
            debug!(repo_url = %repo_url, "No cache entry");
            return Ok(None);
        }

        let json_content = fs::read_to_string(&cache_file).await?;

        let stats: RepoStats =
            serde_json::from_str(&json_content).map_err(|e| CardError::Cache {
                message: format!("Failed to deserialize cache entry: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("stats_cache")
                    .with_operation("load")
                    .with_suggestion("Delete the corrupt cache file and retry"),
            })?;

        debug!(repo_url = %repo_url, commit = %stats.commit, "Loaded cache entry");
        Ok(Some(stats))
    }

    /// Persist a stats snapshot for a repository URL, replacing any previous entry
    pub async fn store(&self, repo_url: &str, stats: &RepoStats) -> CardResult<()> {
        let cache_file = self.cache_path(repo_url);

        if let Some(parent) = cache_file.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json_content = serde_json::to_string_pretty(stats)?;
        fs::write(&cache_file, json_content).await?;

        info!(
            repo_url = %repo_url,
            commit = %stats.commit,
            cache_file = %cache_file.display(),
            "Cached repository stats"
        );
        Ok(())
    }
}
