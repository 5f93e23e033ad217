/*!
 * Directory enumeration
 */

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Result;
use crate::types::FileEntry;

/// Resolve a path to an absolute form, even when it does not exist yet
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let resolved = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent).ok().map(|p| p.join(name)),
        _ => None,
    };
    resolved.unwrap_or(absolute)
}

/// Scanner for directory contents
pub struct Scanner<'a> {
    /// Scanner configuration
    config: &'a Config,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Collect every regular file under the root, sorted by lowercase relative path
    ///
    /// Files inside ignored directories, the output file and (unless requested)
    /// the running executable are left out.
    pub fn scan(&self) -> Result<Vec<FileEntry>> {
        let root = fs::canonicalize(&self.config.target_dir)?;
        let output = resolve_path(&self.config.output_file);
        let own_binary = if self.config.include_self {
            None
        } else {
            self.config.self_path.as_deref().map(resolve_path)
        };

        // Walk the tree, pruning ignored directories before descending
        let mut entries = Vec::new();
        let walker = WalkDir::new(&root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_ignored_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error walking directory: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            // Never document our own output or executable
            let resolved = resolve_path(path);
            if resolved == output {
                info!("Skipping output file: {}", path.display());
                continue;
            }
            if own_binary.as_ref() == Some(&resolved) {
                info!(
                    "Skipping dirbook executable: {} (use --include-self to add it)",
                    path.display()
                );
                continue;
            }

            let rel_path = match path.strip_prefix(&root) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => continue,
            };

            // A failed stat is recorded as an unknown size
            let size = match fs::metadata(path) {
                Ok(metadata) => Some(metadata.len()),
                Err(e) => {
                    warn!("Failed to stat {}: {}", path.display(), e);
                    None
                }
            };

            entries.push(FileEntry::new(path.to_path_buf(), rel_path, size));
        }

        // Sort files by lowercase relative path
        sort_entries(&mut entries);
        debug!("Found {} files under {}", entries.len(), root.display());
        Ok(entries)
    }

    /// Whether an entry's name is one of the ignored directory names
    pub fn is_ignored_dir(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        let ignored = self.config.rules.ignored_dirs.contains(name.as_ref());
        if ignored {
            debug!("Skipping ignored entry: {}", entry.path().display());
        }
        ignored
    }
}

/// Sort entries by lowercase relative path
///
/// Paths equal up to case fall back to the original spelling, so the order
/// never depends on the directory listing.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by_cached_key(|entry| {
        let rel = entry.rel_display();
        (rel.to_lowercase(), rel)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    fn rel_paths(entries: &[FileEntry]) -> Vec<String> {
        entries.iter().map(FileEntry::rel_display).collect()
    }

    #[test]
    fn test_scan_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for rel in [
            "Zeta.md",
            "alpha.txt",
            "src/Main.rs",
            "src/lib.rs",
            "node_modules/pkg/index.js",
            "app/.next/cache.json",
            ".git/HEAD",
        ] {
            touch(root, rel);
        }

        let config = Config::new(root, root.join("export.md"));
        let entries = Scanner::new(&config).scan().unwrap();

        assert_eq!(
            rel_paths(&entries),
            vec!["alpha.txt", "src/lib.rs", "src/Main.rs", "Zeta.md"]
        );
        assert_eq!(entries[0].size, Some("alpha.txt".len() as u64));
        assert_eq!(entries[2].extension, ".rs");
    }

    #[test]
    fn test_output_file_excluded() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.txt");
        touch(dir.path(), "export.md");

        let config = Config::new(dir.path(), dir.path().join("export.md"));
        let entries = Scanner::new(&config).scan().unwrap();
        assert_eq!(rel_paths(&entries), vec!["a.txt"]);
    }

    #[test]
    fn test_own_binary_excluded_unless_requested() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.txt");
        touch(dir.path(), "tool/dirbook");

        let mut config = Config::new(dir.path(), dir.path().join("out.md"));
        config.self_path = Some(dir.path().join("tool/dirbook"));
        assert_eq!(rel_paths(&Scanner::new(&config).scan().unwrap()), vec!["a.txt"]);

        config.include_self = true;
        assert_eq!(
            rel_paths(&Scanner::new(&config).scan().unwrap()),
            vec!["a.txt", "tool/dirbook"]
        );
    }

    #[test]
    fn test_case_only_differences_sort_stably() {
        let entry = |rel: &str| {
            FileEntry::new(PathBuf::from("/r").join(rel), PathBuf::from(rel), None)
        };
        let mut forward = vec![entry("readme.md"), entry("README.md"), entry("b.txt")];
        let mut backward = vec![entry("b.txt"), entry("README.md"), entry("readme.md")];
        sort_entries(&mut forward);
        sort_entries(&mut backward);

        assert_eq!(rel_paths(&forward), vec!["b.txt", "README.md", "readme.md"]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        for rel in ["b/x.py", "B.txt", "a/y.py", "c.txt"] {
            touch(dir.path(), rel);
        }
        let config = Config::new(dir.path(), dir.path().join("out.md"));
        let first = Scanner::new(&config).scan().unwrap();
        let second = Scanner::new(&config).scan().unwrap();
        assert_eq!(first, second);
    }
}
