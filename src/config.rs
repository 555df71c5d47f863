use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use encoding_rs::Encoding;
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".steplintrc.json";

/// Reserved filename for banned-phrase configuration, so the scanner can
/// pick the sources out of arbitrary project files.
pub const BANLIST_FILE_NAME: &str = "BannedStepTextPatterns.xml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Paths and glob patterns excluded from feature/banlist scanning.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Directory scanned for feature files and banlist sources.
    #[serde(default = "default_features_root")]
    pub features_root: String,
    /// Path of the binding discovery feed (JSON).
    #[serde(default = "default_bindings_file")]
    pub bindings_file: String,
    /// Filename that marks a banned-phrase configuration source.
    #[serde(default = "default_banlist_file_name")]
    pub banlist_file_name: String,
    /// Declared text encoding for banlist sources without a byte-order
    /// mark. Absent means UTF-8.
    #[serde(default)]
    pub banlist_encoding: Option<String>,
}

fn default_features_root() -> String {
    "./".to_string()
}

fn default_bindings_file() -> String {
    "./bindings.json".to_string()
}

fn default_banlist_file_name() -> String {
    BANLIST_FILE_NAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            features_root: default_features_root(),
            bindings_file: default_bindings_file(),
            banlist_file_name: default_banlist_file_name(),
            banlist_encoding: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid, if the
    /// banlist filename is empty, or if the declared banlist encoding is an
    /// unknown label.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.banlist_file_name.trim().is_empty() {
            anyhow::bail!("'banlistFileName' must not be empty");
        }

        if let Some(label) = &self.banlist_encoding
            && Encoding::for_label(label.trim().as_bytes()).is_none()
        {
            anyhow::bail!("Unknown encoding label in 'banlistEncoding': \"{}\"", label);
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
