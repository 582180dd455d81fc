// TimeScan - core/discovery.rs
//
// Infers a configuration grid from an existing log tree:
//
//   <base>/<language>/thread_<threads>_<size>_<power>.log
//
// Architecture note: this module uses `walkdir` for directory traversal as
// an OS abstraction and only looks at file *names*, never contents.
//
// The result is the Cartesian product of the distinct values seen. A tree
// with holes therefore yields a grid that fails with FileAccess during the
// scan, exactly like a hand-written grid would.

use crate::core::model::GridConfig;
use crate::util::constants;
use crate::util::error::DiscoveryError;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

/// Walk `base_dir` and build the grid its log files describe.
///
/// # Errors
/// - `RootNotFound` / `NotADirectory` for an unusable base path.
/// - `NoLogFiles` if no file name matches the log naming scheme.
/// - `Traversal` if walkdir fails on an entry below the base.
pub fn discover_grid(base_dir: &Path) -> Result<GridConfig, DiscoveryError> {
    match std::fs::metadata(base_dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DiscoveryError::NotADirectory {
                path: base_dir.to_path_buf(),
            })
        }
        Err(_) => {
            return Err(DiscoveryError::RootNotFound {
                path: base_dir.to_path_buf(),
            })
        }
    }

    let pattern =
        Regex::new(constants::LOG_FILE_NAME_PATTERN).map_err(|source| {
            DiscoveryError::InvalidPattern {
                pattern: constants::LOG_FILE_NAME_PATTERN.to_string(),
                source,
            }
        })?;

    let mut languages = BTreeSet::new();
    let mut power_flags = BTreeSet::new();
    let mut sizes = BTreeSet::new();
    let mut thread_counts = BTreeSet::new();

    let walker = walkdir::WalkDir::new(base_dir)
        .min_depth(constants::DISCOVERY_MAX_DEPTH)
        .max_depth(constants::DISCOVERY_MAX_DEPTH)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| DiscoveryError::Traversal {
            path: base_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            tracing::debug!(path = %entry.path().display(), "Skipping non-UTF-8 file name");
            continue;
        };
        let Some(caps) = pattern.captures(file_name) else {
            tracing::debug!(path = %entry.path().display(), "Skipping non-log file");
            continue;
        };
        let Ok(threads) = caps[1].parse::<u32>() else {
            tracing::debug!(path = %entry.path().display(), "Thread count out of range");
            continue;
        };
        if threads == 0 {
            tracing::debug!(path = %entry.path().display(), "Skipping zero thread count");
            continue;
        }

        let language = entry
            .path()
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str());
        let Some(language) = language else {
            continue;
        };

        tracing::trace!(file = file_name, language, "Log file discovered");
        languages.insert(language.to_string());
        thread_counts.insert(threads);
        sizes.insert(caps[2].to_string());
        power_flags.insert(caps[3].to_string());
    }

    if languages.is_empty() {
        return Err(DiscoveryError::NoLogFiles {
            path: base_dir.to_path_buf(),
        });
    }

    let grid = GridConfig {
        languages: languages.into_iter().collect(),
        power_flags: power_flags.into_iter().collect(),
        sizes: sort_sizes(sizes),
        thread_counts: thread_counts.into_iter().collect(),
        base_dir: base_dir.to_path_buf(),
    };

    tracing::info!(
        base = %base_dir.display(),
        languages = grid.languages.len(),
        power_flags = grid.power_flags.len(),
        sizes = grid.sizes.len(),
        thread_counts = grid.thread_counts.len(),
        "Grid discovered"
    );

    Ok(grid)
}

/// Numeric order when every size is an integer, lexicographic otherwise.
fn sort_sizes(sizes: BTreeSet<String>) -> Vec<String> {
    let mut sizes: Vec<String> = sizes.into_iter().collect();
    if sizes.iter().all(|s| s.parse::<u64>().is_ok()) {
        sizes.sort_by_key(|s| s.parse::<u64>().unwrap_or(0));
    }
    sizes
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(base: &Path, rel: &str) {
        let path = base.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_discovers_distinct_sorted_values() {
        let dir = tempfile::tempdir().unwrap();
        for lang in ["rust", "c++"] {
            for t in [16, 2, 1] {
                for size in ["2000000000", "500000000"] {
                    for p in ["1", "0"] {
                        touch(dir.path(), &format!("{lang}/thread_{t}_{size}_{p}.log"));
                    }
                }
            }
        }

        let grid = discover_grid(dir.path()).unwrap();
        assert_eq!(grid.languages, vec!["c++", "rust"]);
        assert_eq!(grid.power_flags, vec!["0", "1"]);
        assert_eq!(grid.sizes, vec!["500000000", "2000000000"]);
        assert_eq!(grid.thread_counts, vec![1, 2, 16]);
        assert_eq!(grid.base_dir, dir.path());
    }

    #[test]
    fn test_ignores_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "rust/thread_4_100_0.log");
        touch(dir.path(), "rust/notes.txt");
        touch(dir.path(), "rust/thread_x_100_0.log");
        touch(dir.path(), "rust/thread_0_100_0.log");
        touch(dir.path(), "top_level.log");
        touch(dir.path(), "rust/nested/thread_8_100_0.log");

        let grid = discover_grid(dir.path()).unwrap();
        assert_eq!(grid.languages, vec!["rust"]);
        assert_eq!(grid.thread_counts, vec![4]);
    }

    #[test]
    fn test_no_log_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "rust/readme.md");
        assert!(matches!(
            discover_grid(dir.path()),
            Err(DiscoveryError::NoLogFiles { .. })
        ));
    }

    #[test]
    fn test_root_not_found() {
        assert!(matches!(
            discover_grid(Path::new("/nonexistent/path/timescan")),
            Err(DiscoveryError::RootNotFound { .. })
        ));
    }

    #[test]
    fn test_root_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("thread_1_1_0.log");
        fs::write(&file, "content").unwrap();
        assert!(matches!(
            discover_grid(&file),
            Err(DiscoveryError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_non_numeric_sizes_sort_lexicographically() {
        let sizes: BTreeSet<String> = ["10", "9", "big"].iter().map(|s| s.to_string()).collect();
        assert_eq!(sort_sizes(sizes), vec!["10", "9", "big"]);
    }
}
