//! Core analysis context orchestrating input loading and the parallel
//! analysis passes.
//!
//! `CheckContext` materializes all inputs up front: the binding registry
//! and the file lists are built eagerly so the matching hot paths never
//! touch the filesystem. The two analysis products (usage tally, banlist)
//! are computed lazily on first access - a command that only checks banned
//! phrases never parses a feature file.

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

use crate::banlist::loader::{self, BanlistSource, LoadedBanlist};
use crate::cli::args::CommonArgs;
use crate::config::{Config, load_config};
use crate::core::binding::BindingRegistry;
use crate::core::feature;
use crate::core::file_scanner::scan_files;
use crate::core::usage::{self, UsageTally};
use crate::issues::{BanlistFileIssue, ParseErrorIssue};

/// Output of the usage-counting pass.
pub struct UsageData {
    /// Hit counts per registry entry.
    pub tally: UsageTally,
    /// Feature files that could not be parsed (skipped, run continues).
    pub parse_errors: Vec<ParseErrorIssue>,
}

pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// All discovered bindings, patterns compiled, immutable.
    pub registry: BindingRegistry,

    /// Feature files to audit, sorted.
    pub feature_files: Vec<String>,

    /// Banlist configuration sources, sorted.
    pub banlist_files: Vec<String>,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,

    /// Usage tally + feature parse errors, computed on first access.
    usage: OnceCell<UsageData>,

    /// Banned-phrase rules + config diagnostics, computed on first access.
    banlist: OnceCell<LoadedBanlist>,
}

impl CheckContext {
    /// Create a new `CheckContext` from command line arguments.
    ///
    /// Loads configuration, scans the project tree for feature files and
    /// banlist sources, and loads the binding discovery feed. Scanning and
    /// feed loading run in parallel.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid or an explicitly
    /// given bindings feed cannot be read. A missing feed at the default
    /// location is not an error: a project without bindings audits cleanly.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .project_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!("Note: No .steplintrc.json found, using default configuration");
        }
        let config = config_result.config;

        let features_root = resolve(&root_dir, &config.features_root);

        // Scan the project tree and load the bindings feed in parallel.
        let (scan_result, registry_result) = rayon::join(
            || {
                scan_files(
                    &features_root,
                    &config.ignores,
                    &config.banlist_file_name,
                    verbose,
                )
            },
            || load_registry(common_args, &root_dir, &config, verbose),
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            registry: registry_result?,
            feature_files: scan_result.feature_files,
            banlist_files: scan_result.banlist_files,
            verbose,
            usage: OnceCell::new(),
            banlist: OnceCell::new(),
        })
    }

    /// Usage tally over all feature files (lazy initialization).
    ///
    /// Feature files are parsed and tallied in parallel; partial tallies
    /// merge by element-wise addition, so scheduling order cannot change
    /// the totals. Files that fail to parse contribute a parse error and
    /// no counts.
    pub fn usage(&self) -> &UsageData {
        self.usage.get_or_init(|| {
            let registry = &self.registry;

            let per_file: Vec<(UsageTally, Option<ParseErrorIssue>)> = self
                .feature_files
                .par_iter()
                .map(|path| match feature::parse_feature_file(Path::new(path)) {
                    Ok(parsed) => {
                        let mut tally = usage::new_tally(registry);
                        for container in &parsed.containers {
                            usage::tally_container(registry, container, &mut tally);
                        }
                        (tally, None)
                    }
                    Err(e) => (
                        usage::new_tally(registry),
                        Some(ParseErrorIssue {
                            file_path: path.clone(),
                            error: e.to_string(),
                        }),
                    ),
                })
                .collect();

            let mut tally = usage::new_tally(registry);
            let mut parse_errors = Vec::new();
            for (partial, error) in per_file {
                tally = usage::merge_tallies(tally, &partial);
                parse_errors.extend(error);
            }

            UsageData {
                tally,
                parse_errors,
            }
        })
    }

    /// Banned-phrase rules and config diagnostics (lazy initialization).
    ///
    /// Sources are read and parsed in parallel but merged in path order, so
    /// the rule list and diagnostics are deterministic.
    pub fn banlist(&self) -> &LoadedBanlist {
        self.banlist.get_or_init(|| {
            let encoding = &self.config.banlist_encoding;

            let per_source: Vec<_> = self
                .banlist_files
                .par_iter()
                .map(|path| match fs::read(path) {
                    Ok(bytes) => loader::load_source(&BanlistSource {
                        path: path.clone(),
                        bytes,
                        encoding: encoding.clone(),
                    }),
                    Err(e) => (
                        Vec::new(),
                        vec![BanlistFileIssue {
                            file_path: path.clone(),
                            error: format!("Failed to read: {e}"),
                        }],
                    ),
                })
                .collect();

            let mut loaded = LoadedBanlist::default();
            for (rules, issues) in per_source {
                loaded.rules.extend(rules);
                loaded.issues.extend(issues);
            }
            loaded
        })
    }
}

/// Resolve a configured path against the project root.
fn resolve(root_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        let rel = path.strip_prefix(".").unwrap_or(path);
        root_dir.join(rel)
    }
}

fn load_registry(
    common_args: &CommonArgs,
    root_dir: &Path,
    config: &Config,
    verbose: bool,
) -> Result<BindingRegistry> {
    // An explicit --bindings path must exist; the configured default may
    // be absent (a project with no bindings feed audits zero bindings).
    match &common_args.bindings {
        Some(path) => BindingRegistry::load(path),
        None => {
            let path = resolve(root_dir, &config.bindings_file);
            if path.exists() {
                BindingRegistry::load(&path)
            } else {
                if verbose {
                    eprintln!(
                        "Note: no bindings feed at {}, auditing zero bindings",
                        path.display()
                    );
                }
                Ok(BindingRegistry::default())
            }
        }
    }
}
