//! Project tree scanning.
//!
//! One walk collects both the `*.feature` files and the banlist
//! configuration files (identified by their reserved filename). Results are
//! sorted so downstream processing and reporting are deterministic.

use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning the project tree.
pub struct ScanResult {
    pub feature_files: Vec<String>,
    pub banlist_files: Vec<String>,
    pub skipped_count: usize,
}

pub fn scan_files(
    base_dir: &Path,
    ignore_patterns: &[String],
    banlist_file_name: &str,
    verbose: bool,
) -> ScanResult {
    let mut feature_files = Vec::new();
    let mut banlist_files = Vec::new();
    let mut skipped_count = 0;

    // Separate ignore patterns into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            // Literal path mode: resolve against the base for prefix matching
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    for entry in WalkDir::new(base_dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if !path.is_file() {
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) == Some("feature") {
            feature_files.push(path_str.into_owned());
        } else if path.file_name().and_then(|n| n.to_str()) == Some(banlist_file_name) {
            banlist_files.push(path_str.into_owned());
        }
    }

    feature_files.sort();
    banlist_files.sort();

    ScanResult {
        feature_files,
        banlist_files,
        skipped_count,
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    const BANLIST: &str = "BannedStepTextPatterns.xml";

    #[test]
    fn test_scan_feature_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("calc.feature")).unwrap();
        File::create(dir_path.join("login.feature")).unwrap();
        File::create(dir_path.join("notes.txt")).unwrap();

        let result = scan_files(dir_path, &[], BANLIST, false);

        assert_eq!(result.feature_files.len(), 2);
        assert!(result.banlist_files.is_empty());
    }

    #[test]
    fn test_scan_finds_banlist_by_reserved_name() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let sub = dir_path.join("specs");
        fs::create_dir(&sub).unwrap();
        File::create(sub.join(BANLIST)).unwrap();
        File::create(sub.join("OtherPatterns.xml")).unwrap();

        let result = scan_files(dir_path, &[], BANLIST, false);

        assert_eq!(result.banlist_files.len(), 1);
        assert!(result.banlist_files[0].ends_with(BANLIST));
    }

    #[test]
    fn test_scan_results_are_sorted() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("zz.feature")).unwrap();
        File::create(dir_path.join("aa.feature")).unwrap();

        let result = scan_files(dir_path, &[], BANLIST, false);

        assert!(result.feature_files[0].ends_with("aa.feature"));
        assert!(result.feature_files[1].ends_with("zz.feature"));
    }

    #[test]
    fn test_scan_honors_glob_ignores() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let generated = dir_path.join("generated");
        fs::create_dir(&generated).unwrap();
        File::create(generated.join("gen.feature")).unwrap();
        File::create(dir_path.join("real.feature")).unwrap();

        let result = scan_files(dir_path, &["**/generated/**".to_owned()], BANLIST, false);

        assert_eq!(result.feature_files.len(), 1);
        assert!(result.feature_files[0].ends_with("real.feature"));
    }

    #[test]
    fn test_scan_honors_literal_path_ignores() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let legacy = dir_path.join("legacy");
        fs::create_dir(&legacy).unwrap();
        File::create(legacy.join("old.feature")).unwrap();
        File::create(dir_path.join("new.feature")).unwrap();

        let result = scan_files(dir_path, &["legacy".to_owned()], BANLIST, false);

        assert_eq!(result.feature_files.len(), 1);
        assert!(result.feature_files[0].ends_with("new.feature"));
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("specs/*"));
        assert!(is_glob_pattern("**/*.feature"));
        assert!(is_glob_pattern("file?.feature"));
        assert!(!is_glob_pattern("specs"));
        assert!(!is_glob_pattern("specs/legacy"));
    }
}
