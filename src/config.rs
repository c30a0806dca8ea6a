//! Configuration loading and discovery for `t3d.toml`
//!
//! A config file supplies defaults for every engine option; CLI flags
//! override it. Discovery walks up from the working directory, so one file
//! at a project root covers nested invocations.

use crate::engine::Options;
use crate::exclude::{parse_patterns, ExcludeError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse t3d.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Invalid exclude pattern
    #[error(transparent)]
    Exclude(#[from] ExcludeError),
}

/// On-disk schema for `t3d.toml`. Every field is optional; defaults match
/// [`Options::default`].
///
/// ```toml
/// exclude-selectors = [".no-transform", "/^\\.legacy-/"]
/// add-will-change = true
/// smart-will-change = true
/// add-preserve3d = false
/// process-keyframes = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileConfig {
    pub exclude_selectors: Vec<String>,
    pub add_will_change: bool,
    pub smart_will_change: bool,
    pub add_preserve3d: bool,
    pub add_backface_visibility: bool,
    pub add_transform_origin: bool,
    pub process_keyframes: bool,
    pub enable_cache: bool,
    pub handle_prefixes: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        let defaults = Options::default();
        Self {
            exclude_selectors: Vec::new(),
            add_will_change: defaults.add_will_change,
            smart_will_change: defaults.smart_will_change,
            add_preserve3d: defaults.add_preserve3d,
            add_backface_visibility: defaults.add_backface_visibility,
            add_transform_origin: defaults.add_transform_origin,
            process_keyframes: defaults.process_keyframes,
            enable_cache: defaults.enable_cache,
            handle_prefixes: defaults.handle_prefixes,
        }
    }
}

impl FileConfig {
    /// Compile the exclude entries and produce validated engine options.
    pub fn into_options(self) -> Result<Options, ConfigError> {
        let exclude_selectors = parse_patterns(&self.exclude_selectors)?;
        Ok(Options {
            exclude_selectors,
            add_will_change: self.add_will_change,
            smart_will_change: self.smart_will_change,
            add_preserve3d: self.add_preserve3d,
            add_backface_visibility: self.add_backface_visibility,
            add_transform_origin: self.add_transform_origin,
            process_keyframes: self.process_keyframes,
            enable_cache: self.enable_cache,
            handle_prefixes: self.handle_prefixes,
        })
    }
}

/// Load a config file.
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Find `t3d.toml` by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find `t3d.toml` by walking up from `start`.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut dir = Some(start.as_path());
    while let Some(d) = dir {
        let candidate = d.join("t3d.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = d.parent();
    }
    None
}
