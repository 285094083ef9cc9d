#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for lockcheck
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (./lockcheck.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;

use lockcheck_errors::{ConfigError, Error, StorageError};
use lockcheck_types::LockFileSet;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

pub use constants::CACHE_FILE_NAME;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub locks: LockConfig,

    #[serde(default)]
    pub tool: ToolConfig,
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory holding specification files and checked-in lock files
    #[serde(default = "default_requirements_dir")]
    pub requirements_dir: PathBuf,
    /// Directory holding the hash cache
    pub cache_dir: Option<PathBuf>,
}

/// Lock file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockConfig {
    /// Lock file names, in report order
    #[serde(default)]
    pub names: Vec<String>,
    /// Extension of specification files (without the dot)
    #[serde(default = "default_spec_extension")]
    pub spec_extension: String,
}

/// External regeneration tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    pub program: Option<PathBuf>,
    /// Arguments passed before the output directory flag
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_output_flag")]
    pub output_flag: String,
    pub working_dir: Option<PathBuf>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            requirements_dir: default_requirements_dir(),
            cache_dir: None,
        }
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            spec_extension: default_spec_extension(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            output_flag: default_output_flag(),
            working_dir: None,
        }
    }
}

// Default value functions for serde
fn default_requirements_dir() -> PathBuf {
    PathBuf::from("requirements")
}

fn default_spec_extension() -> String {
    "in".to_string()
}

fn default_output_flag() -> String {
    "--output-dir".to_string()
}

impl Config {
    /// Get the default config file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE_NAME)
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| read_error(&e, path))?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Load configuration from an optional path or use default
    ///
    /// An explicit path must exist. Without one, `./lockcheck.toml` is used
    /// when present and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => {
                let default_path = Self::default_path();
                if fs::try_exists(&default_path).await.unwrap_or(false) {
                    Self::load_from_file(&default_path).await
                } else {
                    tracing::debug!("no configuration file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable is set but empty.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Some(dir) = non_empty_env(constants::ENV_CACHE_DIR)? {
            self.paths.cache_dir = Some(PathBuf::from(dir));
        }

        if let Some(dir) = non_empty_env(constants::ENV_REQUIREMENTS_DIR)? {
            self.paths.requirements_dir = PathBuf::from(dir);
        }

        if let Some(tool) = non_empty_env(constants::ENV_TOOL)? {
            self.tool.program = Some(PathBuf::from(tool));
        }

        Ok(())
    }

    /// Get the cache directory (with default)
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.paths.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir().map_or_else(
                || PathBuf::from(constants::FALLBACK_CACHE_DIR),
                |dir| dir.join("lockcheck"),
            )
        })
    }

    /// Get the hash cache file path
    #[must_use]
    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir().join(constants::CACHE_FILE_NAME)
    }

    /// Get the debug log directory
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.cache_dir().join(constants::LOGS_DIR_NAME)
    }

    /// Validate the configured lock names
    ///
    /// # Errors
    ///
    /// Returns an error if no lock files are configured or a name is invalid.
    pub fn lock_set(&self) -> Result<LockFileSet, Error> {
        LockFileSet::new(self.locks.names.iter().cloned()).map_err(Into::into)
    }

    /// Get the regeneration tool program
    ///
    /// # Errors
    ///
    /// Returns an error if no program is configured.
    pub fn tool_program(&self) -> Result<&Path, Error> {
        self.tool.program.as_deref().ok_or_else(|| {
            ConfigError::MissingField {
                field: "tool.program".to_string(),
            }
            .into()
        })
    }
}

fn read_error(err: &std::io::Error, path: &Path) -> Error {
    match err.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.display().to_string(),
        }
        .into(),
        ErrorKind::InvalidData => ConfigError::ParseError {
            message: format!("{}: {err}", path.display()),
        }
        .into(),
        _ => StorageError::from_io_with_path(err, path).into(),
    }
}

fn non_empty_env(var: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::InvalidValue {
            field: var.to_string(),
            value,
        }),
        Ok(value) => Ok(Some(value)),
        Err(_) => Ok(None),
    }
}
