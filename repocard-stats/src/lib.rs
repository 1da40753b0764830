//! Repocard Stats - Repository statistics resolver
//!
//! Responsible for looking up the latest remote commit, maintaining local
//! working copies, computing file/line/byte statistics, and caching the
//! result keyed on the remote commit.

pub mod api;
pub mod cache;
pub mod git;
pub mod resolver;
pub mod walker;

pub use api::{ApiClientConfig, CommitApi, GitHubCommitClient};
pub use cache::{cache_key, StatsCache};
pub use git::{GitWorkspace, Vcs};
pub use resolver::StatsResolver;
pub use walker::{compute_tree_stats, TreeStats};
