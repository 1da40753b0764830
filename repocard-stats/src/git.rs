//! Local working-copy management through the system git command

use async_trait::async_trait;
use repocard_core::{CardError, CardResult, ErrorContext, RepoRef};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Trait for version-control operations on local working copies
///
/// Seam between the resolver and the actual git binary so that resolver
/// behavior (in particular: which paths trigger a clone/fetch at all) can be
/// tested against an in-memory implementation.
#[async_trait]
pub trait Vcs: Send + Sync {
    /// Ensure a working copy for `repo` exists and is up to date; returns its path.
    ///
    /// Shallow-clones when absent, fetches when present.
    async fn ensure_working_copy(&self, repo: &RepoRef, repo_url: &str) -> CardResult<PathBuf>;

    /// Commit id currently checked out in the working copy
    async fn local_commit(&self, working_copy: &Path) -> CardResult<String>;
}

/// Working-copy manager shelling out to the git command line tool
#[derive(Debug, Clone)]
pub struct GitWorkspace {
    repos_dir: PathBuf,
    clone_depth: u32,
}

impl GitWorkspace {
    pub fn new<P: AsRef<Path>>(repos_dir: P, clone_depth: u32) -> Self {
        Self {
            repos_dir: repos_dir.as_ref().to_path_buf(),
            clone_depth,
        }
    }

    /// Run a git command, returning stdout on success
    async fn run_git(&self, args: &[&str], cwd: Option<&Path>) -> CardResult<Vec<u8>> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|e| CardError::Git {
            message: format!("Failed to execute git {}: {}", args.join(" "), e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("git_workspace")
                .with_operation("run_git")
                .with_suggestion("Ensure git is installed and accessible"),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CardError::Git {
                message: format!("git {} failed: {}", args.join(" "), stderr.trim()),
                source: None,
                context: ErrorContext::new("git_workspace")
                    .with_operation("run_git")
                    .with_suggestion("Check repository URL and access permissions"),
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl Vcs for GitWorkspace {
    async fn ensure_working_copy(&self, repo: &RepoRef, repo_url: &str) -> CardResult<PathBuf> {
        let target = self.repos_dir.join(repo.directory_name());

        if target.exists() {
            debug!(
                repo = %repo,
                working_copy = %target.display(),
                "Working copy present, fetching"
            );
            self.run_git(&["fetch", "origin"], Some(&target)).await?;
        } else {
            info!(
                repo = %repo,
                working_copy = %target.display(),
                "Cloning repository"
            );

            tokio::fs::create_dir_all(&self.repos_dir)
                .await
                .map_err(|e| CardError::Git {
                    message: format!("Failed to create repos directory: {}", e),
                    source: Some(Box::new(e)),
                    context: ErrorContext::new("git_workspace")
                        .with_operation("ensure_working_copy"),
                })?;

            let depth = self.clone_depth.to_string();
            let target_str = target.to_string_lossy().to_string();
            self.run_git(
                &[
                    "clone",
                    "--depth",
                    &depth,
                    "--single-branch",
                    repo_url,
                    &target_str,
                ],
                None,
            )
            .await?;
        }

        Ok(target)
    }

    async fn local_commit(&self, working_copy: &Path) -> CardResult<String> {
        let stdout = self
            .run_git(&["rev-parse", "HEAD"], Some(working_copy))
            .await?;
        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_copy_path_layout() {
        let workspace = GitWorkspace::new("/tmp/repos", 1);
        let repo = RepoRef {
            owner: "octocat".to_string(),
            name: "Hello-World".to_string(),
        };
        assert_eq!(
            workspace.repos_dir.join(repo.directory_name()),
            PathBuf::from("/tmp/repos/octocat_Hello-World")
        );
    }

    #[tokio::test]
    async fn test_run_git_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = GitWorkspace::new(dir.path(), 1);

        // rev-parse in a directory that is not a repository must surface a Git error
        let result = workspace.local_commit(dir.path()).await;
        assert!(matches!(result, Err(CardError::Git { .. })));
    }
}
