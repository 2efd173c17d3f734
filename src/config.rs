use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{NextTagError, Result};

/// Name of the settings file, looked up in the repository root and the user config directory.
pub const CONFIG_FILE_NAME: &str = ".git-next-tag.toml";

/// Represents the complete configuration for git-next-tag.
///
/// Controls how tag names are rendered, how tags are created and pushed, and which files
/// receive the new version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Prefix tag names with `v`
    #[serde(default = "default_true")]
    pub initial_v: bool,

    /// Create annotated tags instead of lightweight ones
    #[serde(default)]
    pub tag_annotated: bool,

    /// Files, relative to the repository root, whose version strings are rewritten
    #[serde(default)]
    pub version_files: Vec<PathBuf>,

    /// Leave the pre-marked development version in `version_files` after tagging
    #[serde(default = "default_true")]
    pub always_leave_version_pre: bool,

    /// Remote used when pushing the new tag
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Push the new tag after creating it
    #[serde(default)]
    pub push: bool,
}

fn default_true() -> bool {
    true
}

/// Returns the default remote name.
fn default_remote() -> String {
    "origin".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_v: true,
            tag_annotated: false,
            version_files: Vec::new(),
            always_leave_version_pre: true,
            remote: default_remote(),
            push: false,
        }
    }
}

impl Config {
    /// Validates settings that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.remote.trim().is_empty() {
            return Err(NextTagError::config("remote must not be empty"));
        }
        if let Some(path) = self.version_files.iter().find(|p| p.is_absolute()) {
            return Err(NextTagError::config(format!(
                "version file '{}' must be relative to the repository root",
                path.display()
            )));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.git-next-tag.toml` in the repository root
/// 3. `.git-next-tag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_root` - Working directory of the repository, if known
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, repo_root: Option<&Path>) -> Result<Config> {
    let candidate = if let Some(path) = config_path {
        Some(path.to_path_buf())
    } else {
        repo_root
            .map(|root| root.join(CONFIG_FILE_NAME))
            .filter(|p| p.exists())
            .or_else(|| {
                dirs::config_dir()
                    .map(|dir| dir.join(CONFIG_FILE_NAME))
                    .filter(|p| p.exists())
            })
    };

    let Some(path) = candidate else {
        debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        NextTagError::config(format!("cannot read '{}': {}", path.display(), e))
    })?;
    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}

/// Writes the default configuration into `repo_root`.
///
/// Refuses to overwrite an existing file.
pub fn write_default_config(repo_root: &Path) -> Result<PathBuf> {
    let path = repo_root.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(NextTagError::config(format!(
            "'{}' already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&Config::default())?;
    fs::write(&path, content)?;
    debug!(path = %path.display(), "wrote default configuration");
    Ok(path)
}
