//! # Configuration Module
//!
//! Optional project configuration for license-tagger, so a repository can
//! pin its exclude list and template directory instead of repeating them on
//! every invocation.
//!
//! Configuration lives in a `.license-tagger.toml` file in the project root
//! or at the path named by the `LICENSE_TAGGER_CONFIG` environment variable:
//!
//! ```toml
//! excludes = ["vendor", "third_party"]
//! template-dir = "hack/boilerplate"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".license-tagger.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICENSE_TAGGER_CONFIG";

/// Project configuration.
///
/// Every key is optional. Values given on the command line take precedence
/// over the ones loaded here, which in turn take precedence over the
/// built-in defaults.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
  /// Directory names that are never descended into.
  #[serde(default)]
  pub excludes: Option<Vec<String>>,

  /// Directory holding the per-kind header templates. Relative paths are
  /// resolved against the directory the tool runs from.
  #[serde(default)]
  pub template_dir: Option<PathBuf>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML or unknown keys.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is well-formed TOML but not usable.
  #[error("Invalid value for '{key}': {message}")]
  Invalid { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Errors
  ///
  /// Fails when the file cannot be read, is not valid TOML, carries keys
  /// other than `excludes` and `template-dir`, or lists an exclude that is
  /// not a bare directory name.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Excludes are matched against single path components, so anything with
  /// a separator could never match.
  fn validate(&self) -> Result<(), ConfigError> {
    for exclude in self.excludes.iter().flatten() {
      if exclude.trim().is_empty() {
        return Err(ConfigError::Invalid {
          key: "excludes".to_string(),
          message: "entries cannot be empty".to_string(),
        });
      }

      if exclude.contains('/') || exclude.contains('\\') {
        return Err(ConfigError::Invalid {
          key: "excludes".to_string(),
          message: format!("'{exclude}' must be a folder name, not a path"),
        });
      }
    }

    if let Some(ref dir) = self.template_dir
      && dir.as_os_str().is_empty()
    {
      return Err(ConfigError::Invalid {
        key: "template-dir".to_string(),
        message: "path cannot be empty".to_string(),
      });
    }

    Ok(())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `LICENSE_TAGGER_CONFIG` environment variable
/// 3. `.license-tagger.toml` in the project root
///
/// Returns `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, project_root: &Path) -> Option<PathBuf> {
  // 1. Explicit path from CLI takes highest priority
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  // 2. Check environment variable
  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  // 3. Check project root
  let project_config = project_root.join(DEFAULT_CONFIG_FILENAME);
  if project_config.exists() {
    verbose_log!("Using project config: {}", project_config.display());
    return Some(project_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `Ok(None)` when discovery is disabled with `no_config` or no file
/// is found.
pub fn load_config(explicit_path: Option<&Path>, project_root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, project_root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
