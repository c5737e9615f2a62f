//! Source configuration loading
//!
//! Configuration is resolved with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. YAML file (when a path is given)
//! 3. Environment variables (DOCKYARD_* prefix)

use crate::error::{Error, Result};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::time::Duration;
use tracing::debug;

/// Default relative path of the library directory inside the mirror
pub const DEFAULT_LIBRARY_PATH: &str = "library";

/// Default directory name of the mirror inside the workspace
pub const DEFAULT_MIRROR_DIRECTORY: &str = "bashbrew";

/// Default minimum delay between two mirror refreshes
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

/// Configuration of a Dockerfile source backed by a library mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceConfig {
    /// Local workspace root, created if absent
    #[serde(default)]
    pub workspace: Utf8PathBuf,

    /// Upstream repository URL of the library index
    #[serde(default)]
    pub mirror_url: String,

    /// Library directory, relative to the mirror root
    #[serde(default = "default_library_path")]
    pub library_path: String,

    /// Mirror directory, relative to the workspace
    #[serde(default = "default_mirror_directory")]
    pub mirror_directory: String,

    /// Minimum seconds between two pulls of the mirror
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            workspace: Utf8PathBuf::new(),
            mirror_url: String::new(),
            library_path: default_library_path(),
            mirror_directory: default_mirror_directory(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

fn default_library_path() -> String {
    DEFAULT_LIBRARY_PATH.to_string()
}

fn default_mirror_directory() -> String {
    DEFAULT_MIRROR_DIRECTORY.to_string()
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

impl SourceConfig {
    /// Create a configuration with the required fields and defaults for the rest
    pub fn new(workspace: impl Into<Utf8PathBuf>, mirror_url: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            mirror_url: mirror_url.into(),
            ..Default::default()
        }
    }

    /// Set the refresh interval
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval_secs = interval.as_secs();
        self
    }

    /// Load configuration from an optional YAML file, then apply environment overrides
    ///
    /// The result is validated before it is returned.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let config = Self::load_layered(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Same layering as [`SourceConfig::load`], without validation
    ///
    /// For callers that apply their own overrides (CLI flags) on top.
    pub fn load_layered(path: Option<&Utf8Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load_yaml_file(p)?,
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    fn load_yaml_file(path: &Utf8Path) -> Result<Self> {
        debug!("Loading source configuration from {}", path);
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    /// Apply DOCKYARD_* environment variables on top of the current values
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = env::var("DOCKYARD_WORKSPACE") {
            self.workspace = Utf8PathBuf::from(val);
        }

        if let Ok(val) = env::var("DOCKYARD_MIRROR_URL") {
            self.mirror_url = val;
        }

        if let Ok(val) = env::var("DOCKYARD_LIBRARY_PATH") {
            self.library_path = val;
        }

        if let Ok(val) = env::var("DOCKYARD_MIRROR_DIRECTORY") {
            self.mirror_directory = val;
        }

        if let Ok(val) = env::var("DOCKYARD_REFRESH_INTERVAL_SECS") {
            self.refresh_interval_secs = val.trim().parse().map_err(|_| {
                Error::invalid_config("DOCKYARD_REFRESH_INTERVAL_SECS must be a valid number")
            })?;
        }

        Ok(())
    }

    /// Reject configurations the source cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.workspace.as_str().trim().is_empty() {
            return Err(Error::invalid_config("workspace must be defined"));
        }
        if self.mirror_url.trim().is_empty() {
            return Err(Error::invalid_config("mirror-url must be defined"));
        }
        if self.mirror_directory.trim().is_empty() {
            return Err(Error::invalid_config("mirror-directory must not be blank"));
        }
        ensure_relative("mirror-directory", &self.mirror_directory)?;
        ensure_relative("library-path", &self.library_path)?;
        Ok(())
    }

    /// Minimum delay between two mirror refreshes
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Working copy of the mirror
    pub fn mirror_dir(&self) -> Utf8PathBuf {
        self.workspace.join(&self.mirror_directory)
    }

    /// Library directory inside the mirror working copy
    pub fn library_dir(&self) -> Utf8PathBuf {
        self.mirror_dir().join(&self.library_path)
    }
}

/// Reject paths that would escape the directory they are joined to
fn ensure_relative(key: &str, value: &str) -> Result<()> {
    let stays_inside = Utf8Path::new(value)
        .components()
        .all(|c| matches!(c, Utf8Component::Normal(_) | Utf8Component::CurDir));
    if !stays_inside {
        return Err(Error::invalid_config(format!(
            "{} must be a relative path without '..', got '{}'",
            key, value
        )));
    }
    Ok(())
}
