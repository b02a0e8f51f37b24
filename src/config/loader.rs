//! Configuration file loading with precedence handling.

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::state::{PagingConfig, DEFAULT_PAGE_SIZE, DEFAULT_PREFETCH_SCREENS};
use crate::view::constants::{DEFAULT_COLLAPSED_LINES, DEFAULT_MAX_PHOTOS};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "REVLIST_CONFIG";
/// Environment variable overriding the page size.
pub const PAGE_SIZE_ENV: &str = "REVLIST_PAGE_SIZE";
/// Environment variable overriding the prefetch look-ahead.
pub const PREFETCH_SCREENS_ENV: &str = "REVLIST_PREFETCH_SCREENS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting holds a value the core cannot run with.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name as written in the config file.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/revlist/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Reviews requested per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Prefetch look-ahead in viewport heights.
    #[serde(default)]
    pub prefetch_screens: Option<f64>,

    /// Lines shown for a collapsed review body.
    #[serde(default)]
    pub collapsed_lines: Option<usize>,

    /// Photo tiles shown per review.
    #[serde(default)]
    pub max_photos: Option<usize>,

    /// Image cache entry limit (0 = unbounded).
    #[serde(default)]
    pub cache_capacity: Option<usize>,

    /// Load plain `http://` photo URLs.
    #[serde(default)]
    pub allow_insecure_images: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Reviews requested per page.
    pub page_size: usize,
    /// Prefetch look-ahead in viewport heights.
    pub prefetch_screens: f64,
    /// Lines shown for a collapsed review body.
    pub collapsed_lines: usize,
    /// Photo tiles shown per review.
    pub max_photos: usize,
    /// Image cache entry limit (0 = unbounded).
    pub cache_capacity: usize,
    /// Load plain `http://` photo URLs.
    pub allow_insecure_images: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            prefetch_screens: DEFAULT_PREFETCH_SCREENS,
            collapsed_lines: DEFAULT_COLLAPSED_LINES,
            max_photos: DEFAULT_MAX_PHOTOS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            allow_insecure_images: false,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Reject settings the core cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero page size, a zero
    /// collapsed line cap, or a negative / non-finite prefetch look-ahead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.collapsed_lines == 0 {
            return Err(ConfigError::InvalidValue {
                field: "collapsed_lines",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.prefetch_screens.is_finite() && self.prefetch_screens >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "prefetch_screens",
                reason: format!("{} is not a non-negative number", self.prefetch_screens),
            });
        }
        Ok(())
    }

    /// Paging tunables.
    pub fn paging_config(&self) -> PagingConfig {
        PagingConfig {
            page_size: self.page_size,
            prefetch_screens: self.prefetch_screens,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/revlist/revlist.log` on Linux, or the
/// platform state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("revlist").join("revlist.log")
    } else {
        PathBuf::from("revlist.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/revlist/config.toml` on Linux, the platform config
/// directory elsewhere, or `None` when it cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("revlist").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `REVLIST_CONFIG` environment variable
/// 3. Default path `~/.config/revlist/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `REVLIST_PAGE_SIZE`: Override page size
/// - `REVLIST_PREFETCH_SCREENS`: Override prefetch look-ahead
///
/// Values that do not parse are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(page_size) = parse_env::<usize>(PAGE_SIZE_ENV) {
        config.page_size = page_size;
    }

    if let Some(screens) = parse_env::<f64>(PREFETCH_SCREENS_ENV) {
        config.prefetch_screens = screens;
    }

    config
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Ignoring unparsable environment override");
            None
        }
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        prefetch_screens: config.prefetch_screens.unwrap_or(defaults.prefetch_screens),
        collapsed_lines: config.collapsed_lines.unwrap_or(defaults.collapsed_lines),
        max_photos: config.max_photos.unwrap_or(defaults.max_photos),
        cache_capacity: config.cache_capacity.unwrap_or(defaults.cache_capacity),
        allow_insecure_images: config
            .allow_insecure_images
            .unwrap_or(defaults.allow_insecure_images),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    page_size_override: Option<usize>,
    collapsed_lines_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    if let Some(lines) = collapsed_lines_override {
        config.collapsed_lines = lines;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
