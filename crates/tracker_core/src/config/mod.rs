use crate::error::AppError;
use crate::storage::json_store;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
pub const CONFIG_ENV_VAR: &str = "TASKS_CONFIG_PATH";

/// Settings read from the config file. Unknown keys are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

/// Values supplied on the command line, applied over the file and the
/// environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Picks the task store file: command line override, then
    /// `TASKS_STORE_PATH`, then this config, then `tasks.json`.
    pub fn resolve_store_path(&self, overrides: &ConfigOverrides) -> PathBuf {
        match overrides.store_path.as_ref() {
            Some(path) => path.clone(),
            None => json_store::store_path(self.store_path.as_deref()),
        }
    }
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    let base = if cfg!(windows) {
        std::env::var("APPDATA")
            .map(PathBuf::from)
            .map_err(|_| AppError::invalid_data("APPDATA is not set"))?
    } else {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
            .map_err(|_| AppError::invalid_data("HOME is not set"))?
    };

    Ok(base.join("tasks").join(CONFIG_FILE_NAME))
}

/// Loads the config file, substituting defaults on any failure. The failure
/// is handed back so the caller can report it.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_or_default(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_or_default(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match read_config(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

/// A relative `store_path` is taken relative to the directory holding the
/// config file, so the store does not move with the working directory.
fn read_config(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::invalid_data(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;

    config.store_path = match config.store_path {
        Some(store) if store.as_os_str().is_empty() => None,
        Some(store) if store.is_relative() => {
            let dir = path.parent().unwrap_or_else(|| Path::new(""));
            Some(dir.join(store))
        }
        other => other,
    };

    Ok(config)
}
