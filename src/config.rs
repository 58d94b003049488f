// Configuration loading and parsing (gaffer.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::team::squad::formation_positions;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// gaffer.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the gaffer.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    team: TeamSection,
    database: DatabaseSection,
}

#[derive(Debug, Clone, Deserialize)]
struct TeamSection {
    name: String,
    formation: String,
}

#[derive(Debug, Clone, Deserialize)]
struct DatabaseSection {
    path: String,
}

/// The assembled application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Display name for the user's team.
    pub team_name: String,
    /// Preferred formation preset (e.g. "4-4-2").
    pub formation: String,
    /// Path to the SQLite database file.
    pub db_path: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/gaffer.toml` relative to
/// the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization
/// automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_path = base_dir.join("config").join("gaffer.toml");
    let text = std::fs::read_to_string(&config_path).map_err(|_| ConfigError::FileNotFound {
        path: config_path.clone(),
    })?;

    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: config_path,
        source: e,
    })?;

    let config = Config {
        team_name: file.team.name,
        formation: file.team.formation,
        db_path: file.database.path,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure `config/gaffer.toml` exists by copying it from `defaults/` when
/// missing. Returns the copied path, or `None` when nothing was copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let default_path = base_dir.join("defaults").join("gaffer.toml");
    let config_dir = base_dir.join("config");
    let target = config_dir.join("gaffer.toml");

    if target.exists() {
        return Ok(None);
    }
    if !default_path.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor {} found; run from the project root or create the config file",
                target.display(),
                default_path.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&default_path, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", default_path.display()),
    })?;

    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working
/// directory, copying the default config file first when needed.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    let _copied = ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.team_name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "team.name".into(),
            message: "must not be empty".into(),
        });
    }

    if formation_positions(&config.formation).is_none() {
        return Err(ConfigError::ValidationError {
            field: "team.formation".into(),
            message: format!(
                "unknown formation `{}`; expected one of 4-4-2, 4-3-3, 3-5-2, 5-3-2",
                config.formation
            ),
        });
    }

    if config.db_path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "database.path".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
