//! Configuration loading from files and environment (immutable pattern)
//!
//! All operations return new instances rather than mutating in place.

use std::path::{Path, PathBuf};

use super::types::{ColorChoice, Config, ConfigFile};
use crate::{error::ConfigError, Result};

/// Disables color when set to any value.
pub const ENV_NO_COLOR: &str = "NO_COLOR";
/// `auto`, `always` or `never`.
pub const ENV_COLOR: &str = "STATEOUT_COLOR";
/// `true`/`false` (or `1`/`0`).
pub const ENV_COMPACT_WARNINGS: &str = "STATEOUT_COMPACT_WARNINGS";
/// Positive wrap width.
pub const ENV_COLUMNS: &str = "STATEOUT_COLUMNS";
/// State file override.
pub const ENV_STATE: &str = "STATEOUT_STATE";

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from all sources with hierarchy.
///
/// # Errors
///
/// Returns error if:
/// - A config file cannot be read or is malformed TOML
/// - A config file contains unknown keys
/// - An environment variable holds an invalid value
pub fn load_config() -> Result<Config> {
    let project_path = project_config_path()?;
    load_config_with(global_config_path().as_deref(), &project_path, |key| {
        std::env::var(key).ok()
    })
}

/// Load configuration from explicit file paths and an environment lookup.
///
/// Files that do not exist are skipped.
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_with(
    global_path: Option<&Path>,
    project_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    // 1. Built-in defaults
    let config = Config::default();

    // 2. Global config
    let config = match global_path.filter(|path| path.exists()) {
        Some(path) => config.merge(load_toml_file(path)?),
        None => config,
    };

    // 3. Project config
    let config = if project_path.exists() {
        config.merge(load_toml_file(project_path)?)
    } else {
        config
    };

    // 4. Environment
    let config = config.apply_env(env)?;

    config.validate()?;
    tracing::debug!("Loaded config: {config:?}");
    Ok(config)
}

// ═══════════════════════════════════════════════════════════════════════════
// PATH HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Get path to global config file
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "stateout")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Get path to project config file
///
/// # Errors
///
/// Returns error if current directory cannot be determined
pub fn project_config_path() -> Result<PathBuf> {
    std::env::current_dir()
        .map(|dir| dir.join(".stateout").join("config.toml"))
        .map_err(|e| {
            ConfigError::Io {
                path: PathBuf::from("."),
                message: format!("failed to get current directory: {e}"),
            }
            .into()
        })
}

/// Load one TOML config file
///
/// # Errors
///
/// Returns error if the path is a directory, cannot be read, or does not
/// parse as a config file
pub fn load_toml_file(path: &Path) -> Result<ConfigFile> {
    if path.is_dir() {
        return Err(ConfigError::Io {
            path: path.to_path_buf(),
            message: "path is a directory, not a file".to_string(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
        .into()
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLE OVERRIDES (Immutable pattern)
// ═══════════════════════════════════════════════════════════════════════════

fn invalid(key: &str, message: impl Into<String>) -> crate::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
    .into()
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(invalid(key, format!("expected true or false, got {other:?}"))),
    }
}

impl Config {
    /// Apply environment variable overrides.
    ///
    /// `NO_COLOR` wins over `STATEOUT_COLOR`.
    ///
    /// # Errors
    ///
    /// Returns error if an environment variable value is invalid
    pub fn apply_env(mut self, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = env(ENV_COLOR) {
            self.color = value.trim().parse::<ColorChoice>().map_err(|_| {
                invalid(
                    ENV_COLOR,
                    format!("expected auto, always or never, got {value:?}"),
                )
            })?;
        }

        if env(ENV_NO_COLOR).is_some() {
            self.color = ColorChoice::Never;
        }

        if let Some(value) = env(ENV_COMPACT_WARNINGS) {
            self.compact_warnings = parse_bool(ENV_COMPACT_WARNINGS, &value)?;
        }

        if let Some(value) = env(ENV_COLUMNS) {
            let columns = value
                .trim()
                .parse::<usize>()
                .map_err(|e| invalid(ENV_COLUMNS, e.to_string()))?;
            self.columns = Some(columns);
        }

        if let Some(value) = env(ENV_STATE) {
            if value.is_empty() {
                return Err(invalid(
                    ENV_STATE,
                    "cannot be empty - unset the variable or provide a path",
                ));
            }
            self.state_path = Some(PathBuf::from(value));
        }

        Ok(self)
    }

    /// Check invariants that no single layer can enforce.
    ///
    /// # Errors
    ///
    /// Returns error if `columns` is zero
    pub fn validate(&self) -> Result<()> {
        if self.columns == Some(0) {
            return Err(invalid("columns", "must be greater than zero"));
        }
        Ok(())
    }
}
