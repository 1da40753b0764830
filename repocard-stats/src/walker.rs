//! Filesystem statistics walker
//!
//! Walks a working copy and aggregates file counts, byte size, and line
//! counts, excluding version-control metadata directories.

use repocard_core::CardResult;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Raw aggregates over a directory tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub total_files: u64,
    pub code_files: u64,
    pub size_bytes: u64,
    pub total_lines: u64,
}

/// Compute aggregate statistics for a working copy.
///
/// `.git` directories are skipped entirely. Byte size is aggregated over all
/// files; line counts only over files whose extension is in `code_extensions`
/// (compared case-insensitively, without the dot). Files are decoded lossily
/// as UTF-8, so decoding errors never fail the walk; a line is any terminated
/// or unterminated record.
pub fn compute_tree_stats(root: &Path, code_extensions: &HashSet<String>) -> CardResult<TreeStats> {
    let mut stats = TreeStats::default();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Skip entries we cannot read
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        stats.total_files += 1;

        if let Ok(metadata) = entry.metadata() {
            stats.size_bytes += metadata.len();
        }

        let is_code = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| code_extensions.contains(&ext.to_ascii_lowercase()))
            .unwrap_or(false);

        if is_code {
            stats.code_files += 1;
            if let Ok(bytes) = std::fs::read(entry.path()) {
                stats.total_lines += String::from_utf8_lossy(&bytes).lines().count() as u64;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn extensions(exts: &[&str]) -> HashSet<String> {
        exts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_exclude_git_metadata() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "one\ntwo\nthree\n").unwrap();
        fs::write(dir.path().join("b.txt"), "1\n2\n3\n4\n5\n").unwrap();

        let git_dir = dir.path().join(".git").join("objects");
        fs::create_dir_all(&git_dir).unwrap();
        fs::write(git_dir.join("pack.py"), "should\nnot\ncount\n").unwrap();
        fs::write(dir.path().join(".git").join("HEAD"), "ref: refs/heads/main\n").unwrap();

        let stats = compute_tree_stats(dir.path(), &extensions(&["py"])).unwrap();

        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.code_files, 1);
        assert_eq!(stats.total_lines, 3);
        assert!(stats.total_files >= stats.code_files);
    }

    #[test]
    fn test_byte_size_covers_all_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("code.rs"), "fn main() {}\n").unwrap();
        fs::write(dir.path().join("data.bin"), vec![0u8; 100]).unwrap();

        let stats = compute_tree_stats(dir.path(), &extensions(&["rs"])).unwrap();

        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.code_files, 1);
        assert_eq!(stats.size_bytes, 13 + 100);
    }

    #[test]
    fn test_unterminated_last_line_counts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x.py"), "a\nb\nc").unwrap();

        let stats = compute_tree_stats(dir.path(), &extensions(&["py"])).unwrap();
        assert_eq!(stats.total_lines, 3);
    }

    #[test]
    fn test_invalid_utf8_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("weird.py"), [0x66u8, 0x6f, 0xff, 0x0a, 0x62]).unwrap();

        let stats = compute_tree_stats(dir.path(), &extensions(&["py"])).unwrap();
        assert_eq!(stats.code_files, 1);
        assert_eq!(stats.total_lines, 2);
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Main.PY"), "line\n").unwrap();

        let stats = compute_tree_stats(dir.path(), &extensions(&["py"])).unwrap();
        assert_eq!(stats.code_files, 1);
    }
}
