//! Configuration management for Rolegate
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (ROLEGATE_* prefix, highest precedence)
//! 2. rolegate.local.toml (gitignored, local overrides)
//! 3. rolegate.toml (git-tracked, project config)
//! 4. ~/.config/rolegate/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main Rolegate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RolegateConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the management API, without the `/api/v1` suffix.
    pub url: String,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the signed-in session is stored.
    ///
    /// Defaults to `session.json` inside the user config directory; a
    /// relative path here is resolved against the project directory.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: ColorMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl RolegateConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Resolve the session file, falling back to the user config directory.
    pub fn session_file(&self) -> Result<PathBuf, ConfigError> {
        match &self.session.file {
            Some(path) => Ok(path.clone()),
            None => Paths::new().session_file(),
        }
    }

    /// Resolve relative paths to absolute
    pub fn resolve_paths(&mut self, base_dir: impl AsRef<Path>) {
        if let Some(file) = &self.session.file {
            if file.is_relative() {
                self.session.file = Some(base_dir.as_ref().join(file));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RolegateConfig::default();
        assert_eq!(config.api.url, "http://localhost:8080");
        assert_eq!(config.api.timeout, 30);
        assert_eq!(config.output.color, ColorMode::Auto);
        assert!(config.session.file.is_none());
    }

    #[test]
    fn test_explicit_session_file_wins() {
        let mut config = RolegateConfig::default();
        config.session.file = Some(PathBuf::from("/tmp/session.json"));
        assert_eq!(
            config.session_file().unwrap(),
            PathBuf::from("/tmp/session.json")
        );
    }

    #[test]
    fn test_path_resolution() {
        let mut config = RolegateConfig::default();
        config.session.file = Some(PathBuf::from("state/session.json"));
        config.resolve_paths("/home/user/project");

        assert_eq!(
            config.session.file,
            Some(PathBuf::from("/home/user/project/state/session.json"))
        );
    }

    #[test]
    fn test_absolute_paths_untouched() {
        let mut config = RolegateConfig::default();
        config.session.file = Some(PathBuf::from("/var/lib/rolegate/session.json"));
        config.resolve_paths("/home/user/project");

        assert_eq!(
            config.session.file,
            Some(PathBuf::from("/var/lib/rolegate/session.json"))
        );
    }
}
