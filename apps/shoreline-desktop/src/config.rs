use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Window and startup settings, optionally loaded from a YAML file.
///
/// Every field has a default, so a file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesktopConfig {
    pub title: String,
    /// Logical window width.
    pub width: u32,
    /// Logical window height.
    pub height: u32,
    /// Rock scatter seed. Unset means a fresh layout every launch.
    pub seed: Option<u64>,
    pub show_panel: bool,
    /// `tracing` filter directive used when `--verbose` is not given.
    pub log_filter: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            title: "Beach Sunset Environment".to_string(),
            width: 1280,
            height: 800,
            seed: None,
            show_panel: true,
            log_filter: "info".to_string(),
        }
    }
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl DesktopConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        self.width = self.width.max(1);
        self.height = self.height.max(1);
        self
    }

    pub fn log_filter(&self, verbose: bool) -> &str {
        if verbose { "debug" } else { &self.log_filter }
    }
}
