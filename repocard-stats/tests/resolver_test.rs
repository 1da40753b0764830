//! Resolver behavior tests with mocked remote and VCS seams

use async_trait::async_trait;
use repocard_core::{CardError, CardResult, RepoRef, RepoStats};
use repocard_stats::{CommitApi, StatsCache, StatsResolver, Vcs};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Commit API stub returning a fixed sha and counting invocations
struct FixedCommitApi {
    sha: String,
    calls: AtomicUsize,
}

impl FixedCommitApi {
    fn new(sha: &str) -> Arc<Self> {
        Arc::new(Self {
            sha: sha.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommitApi for FixedCommitApi {
    async fn latest_commit(&self, _repo: &RepoRef) -> CardResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.sha.clone())
    }
}

/// VCS stub serving a pre-populated directory and counting clone/fetch calls
struct FixedVcs {
    working_copy: PathBuf,
    local_sha: String,
    ensure_calls: AtomicUsize,
}

impl FixedVcs {
    fn new(working_copy: &Path, local_sha: &str) -> Arc<Self> {
        Arc::new(Self {
            working_copy: working_copy.to_path_buf(),
            local_sha: local_sha.to_string(),
            ensure_calls: AtomicUsize::new(0),
        })
    }

    fn ensure_count(&self) -> usize {
        self.ensure_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Vcs for FixedVcs {
    async fn ensure_working_copy(&self, _repo: &RepoRef, _repo_url: &str) -> CardResult<PathBuf> {
        self.ensure_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.working_copy.clone())
    }

    async fn local_commit(&self, _working_copy: &Path) -> CardResult<String> {
        Ok(self.local_sha.clone())
    }
}

fn code_extensions() -> HashSet<String> {
    ["py", "rs"].iter().map(|s| s.to_string()).collect()
}

fn populate_tree(root: &Path) {
    std::fs::write(root.join("a.py"), "one\ntwo\nthree\n").unwrap();
    std::fs::write(root.join("b.txt"), "1\n2\n3\n4\n5\n").unwrap();
    let git_dir = root.join(".git");
    std::fs::create_dir_all(&git_dir).unwrap();
    std::fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
}

#[tokio::test]
async fn invalid_repo_url_fails_without_network() {
    let cache_dir = TempDir::new().unwrap();
    let tree_dir = TempDir::new().unwrap();
    let api = FixedCommitApi::new("abc123");
    let vcs = FixedVcs::new(tree_dir.path(), "local123");

    let resolver = StatsResolver::with_components(
        code_extensions(),
        api.clone(),
        vcs.clone(),
        StatsCache::with_cache_dir(cache_dir.path()),
    );

    let result = resolver.resolve("https://gitlab.com/owner/repo").await;

    assert!(matches!(result, Err(CardError::InvalidRepo { .. })));
    assert_eq!(api.call_count(), 0, "no remote lookup for an invalid URL");
    assert_eq!(vcs.ensure_count(), 0);
}

#[tokio::test]
async fn matching_cache_entry_skips_clone_and_recomputation() {
    let cache_dir = TempDir::new().unwrap();
    let tree_dir = TempDir::new().unwrap();
    let url = "https://github.com/octocat/Hello-World";

    let cached = RepoStats {
        commit: "abc123".to_string(),
        repository: url.to_string(),
        total_files: 42,
        code_files: 17,
        size_bytes: 1234,
        total_lines: 900,
    };
    let cache = StatsCache::with_cache_dir(cache_dir.path());
    cache.store(url, &cached).await.unwrap();

    let api = FixedCommitApi::new("abc123");
    let vcs = FixedVcs::new(tree_dir.path(), "localdeadbeef");
    let resolver = StatsResolver::with_components(
        code_extensions(),
        api.clone(),
        vcs.clone(),
        StatsCache::with_cache_dir(cache_dir.path()),
    );

    let stats = resolver.resolve(url).await.unwrap();

    assert_eq!(stats, cached, "cached stats returned verbatim");
    assert_eq!(vcs.ensure_count(), 0, "no clone/fetch on a cache hit");
}

#[tokio::test]
async fn stale_cache_triggers_recomputation_with_remote_commit() {
    let cache_dir = TempDir::new().unwrap();
    let tree_dir = TempDir::new().unwrap();
    populate_tree(tree_dir.path());
    let url = "https://github.com/octocat/Hello-World";

    let stale = RepoStats {
        commit: "oldsha".to_string(),
        repository: url.to_string(),
        total_files: 1,
        code_files: 1,
        size_bytes: 1,
        total_lines: 1,
    };
    StatsCache::with_cache_dir(cache_dir.path())
        .store(url, &stale)
        .await
        .unwrap();

    let api = FixedCommitApi::new("newsha");
    // The working copy HEAD disagrees with the remote on purpose; the
    // resulting snapshot must carry the remote commit.
    let vcs = FixedVcs::new(tree_dir.path(), "localsha");
    let resolver = StatsResolver::with_components(
        code_extensions(),
        api.clone(),
        vcs.clone(),
        StatsCache::with_cache_dir(cache_dir.path()),
    );

    let stats = resolver.resolve(url).await.unwrap();

    assert_eq!(stats.commit, "newsha");
    assert_ne!(stats.commit, "localsha");
    assert_eq!(vcs.ensure_count(), 1);
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.code_files, 1);
    assert_eq!(stats.total_lines, 3);
    assert!(stats.total_files >= stats.code_files);

    // The new snapshot replaced the stale entry.
    let reloaded = StatsCache::with_cache_dir(cache_dir.path())
        .load(url)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded, stats);
}

#[tokio::test]
async fn absent_cache_computes_and_persists() {
    let cache_dir = TempDir::new().unwrap();
    let tree_dir = TempDir::new().unwrap();
    populate_tree(tree_dir.path());
    let url = "https://github.com/octocat/Hello-World";

    let api = FixedCommitApi::new("firstsha");
    let vcs = FixedVcs::new(tree_dir.path(), "firstsha");
    let resolver = StatsResolver::with_components(
        code_extensions(),
        api.clone(),
        vcs.clone(),
        StatsCache::with_cache_dir(cache_dir.path()),
    );

    let stats = resolver.resolve(url).await.unwrap();
    assert_eq!(stats.commit, "firstsha");
    assert_eq!(stats.repository, url);

    // A second resolve with an unchanged remote commit is a pure cache hit.
    let again = resolver.resolve(url).await.unwrap();
    assert_eq!(again, stats);
    assert_eq!(vcs.ensure_count(), 1);
    assert_eq!(api.call_count(), 2, "remote lookup happens on every request");
}
