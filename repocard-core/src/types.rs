//! Core data type definitions

use crate::error::{CardError, CardResult, ErrorContext};
use serde::{Deserialize, Serialize};
use url::Url;

/// A reference to a GitHub repository, parsed from its public URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse a repository URL into owner/name.
    ///
    /// Only `https://github.com/<owner>/<name>[.git]` URLs are accepted; any
    /// other host, scheme, or path shape is rejected without touching the
    /// network.
    pub fn parse(repo_url: &str) -> CardResult<Self> {
        let parsed = Url::parse(repo_url).map_err(|e| CardError::InvalidRepo {
            message: format!("not a valid URL: {}", e),
            context: ErrorContext::new("repo_ref")
                .with_operation("parse")
                .with_suggestion("Use the form https://github.com/owner/repo"),
        })?;

        if parsed.scheme() != "https" || parsed.host_str() != Some("github.com") {
            return Err(CardError::InvalidRepo {
                message: format!("unsupported host: {}", repo_url),
                context: ErrorContext::new("repo_ref")
                    .with_operation("parse")
                    .with_suggestion("Only public https://github.com repositories are supported"),
            });
        }

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        if segments.len() < 2 {
            return Err(CardError::InvalidRepo {
                message: "URL must contain owner and repository name".to_string(),
                context: ErrorContext::new("repo_ref")
                    .with_operation("parse")
                    .with_suggestion("Use the form https://github.com/owner/repo"),
            });
        }

        Ok(Self {
            owner: segments[0].to_string(),
            name: segments[1].trim_end_matches(".git").to_string(),
        })
    }

    /// Directory name used for the local working copy
    pub fn directory_name(&self) -> String {
        format!("{}_{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Aggregate statistics for a repository at a single commit.
///
/// Immutable once computed; this is exactly what gets persisted as a cache
/// entry. The commit id stored here is the *remote* commit the statistics
/// were computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    /// Remote commit id the statistics reflect
    pub commit: String,
    /// Repository URL as requested
    pub repository: String,
    /// Number of files in the working copy (version-control metadata excluded)
    pub total_files: u64,
    /// Number of files whose extension is in the configured code set
    pub code_files: u64,
    /// Aggregate byte size of all files
    pub size_bytes: u64,
    /// Total line count across code files
    pub total_lines: u64,
}

impl RepoStats {
    /// Ordered label/value pairs for presentation
    pub fn labeled(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Commit", self.commit.clone()),
            ("Repository", self.repository.clone()),
            ("Total files", self.total_files.to_string()),
            ("Code files", self.code_files.to_string()),
            ("Size (bytes)", self.size_bytes.to_string()),
            ("Lines of code", self.total_lines.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_repo_url() {
        let repo = RepoRef::parse("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "rust");
        assert_eq!(repo.directory_name(), "rust-lang_rust");
    }

    #[test]
    fn test_parse_strips_git_suffix() {
        let repo = RepoRef::parse("https://github.com/octocat/Hello-World.git").unwrap();
        assert_eq!(repo.name, "Hello-World");
    }

    #[test]
    fn test_parse_allows_trailing_path() {
        let repo = RepoRef::parse("https://github.com/octocat/Hello-World/tree/main").unwrap();
        assert_eq!(repo.owner, "octocat");
        assert_eq!(repo.name, "Hello-World");
    }

    #[test]
    fn test_parse_rejects_other_hosts() {
        assert!(matches!(
            RepoRef::parse("https://gitlab.com/owner/repo"),
            Err(CardError::InvalidRepo { .. })
        ));
        assert!(matches!(
            RepoRef::parse("http://github.com/owner/repo"),
            Err(CardError::InvalidRepo { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_short_paths() {
        assert!(matches!(
            RepoRef::parse("https://github.com/onlyowner"),
            Err(CardError::InvalidRepo { .. })
        ));
        assert!(matches!(
            RepoRef::parse("not a url"),
            Err(CardError::InvalidRepo { .. })
        ));
    }

    #[test]
    fn test_labeled_order() {
        let stats = RepoStats {
            commit: "abc123".to_string(),
            repository: "https://github.com/octocat/Hello-World".to_string(),
            total_files: 10,
            code_files: 4,
            size_bytes: 2048,
            total_lines: 321,
        };

        let labels: Vec<&str> = stats.labeled().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            labels,
            vec![
                "Commit",
                "Repository",
                "Total files",
                "Code files",
                "Size (bytes)",
                "Lines of code"
            ]
        );
    }

    #[test]
    fn test_stats_json_round_trip() {
        let stats = RepoStats {
            commit: "deadbeef".to_string(),
            repository: "https://github.com/octocat/Hello-World".to_string(),
            total_files: 3,
            code_files: 1,
            size_bytes: 99,
            total_lines: 8,
        };

        let json = serde_json::to_string(&stats).unwrap();
        let back: RepoStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, back);
    }
}
