//! # configs
//!
//! Runtime settings for the GameHub binaries. Sources, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `gamehub.toml` in the working directory (optional)
//! 3. a `.env` file, then the process environment, prefixed `GAMEHUB__`
//!    with `__` between levels (e.g. `GAMEHUB__SERVER__PORT=9000`)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "gamehub.toml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Served under `/static`.
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON document per collection under `data_dir`.
    File,
    /// Nothing survives a restart.
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
    /// Seed document applied at startup.
    pub seed_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Reads `.env`, then layers defaults, `gamehub.toml` and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("ignoring unreadable .env file: {e}");
            }
        }
        Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Defaults, then `path` if it exists, then the environment.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080_i64)?
            .set_default("server.static_dir", "static")?
            .set_default("storage.backend", "file")?
            .set_default("storage.data_dir", "data")?
            .set_default("storage.seed_path", "data.json")?
            .set_default("log.level", "info")?
            .set_default("log.json", false)?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("GAMEHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
