//! Configuration for the podcasts CLI.
//!
//! A flat TOML file, layered under `PODCASTS_*` environment variables, and
//! translation to `podcast_core::ClientConfig`. Command-line flags are
//! applied on top by the CLI.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use podcast_core::{ClientConfig, DEFAULT_BASE_URL, SortOrder};

/// Prefix for environment overrides, e.g. `PODCASTS_API_BASE_URL`.
pub const ENV_PREFIX: &str = "PODCASTS_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Backend root URL.
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Retries for transient request failures.
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Rating order used by `list` when `--sort` is not given.
    #[serde(default)]
    pub default_order: SortOrder,

    /// Output format used when `--output` is not given.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            timeout: default_timeout(),
            retries: default_retries(),
            default_order: SortOrder::default(),
            output: default_output(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_retries() -> u32 {
    3
}
fn default_output() -> String {
    "table".into()
}

impl Config {
    /// Translate into the runtime configuration used by `podcast-core`.
    pub fn to_client_config(&self) -> Result<ClientConfig, ConfigError> {
        let base_url =
            url::Url::parse(&self.api_base_url).map_err(|e| ConfigError::Validation {
                field: "api_base_url".into(),
                reason: format!("{e}: {}", self.api_base_url),
            })?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        Ok(ClientConfig {
            base_url,
            timeout: Duration::from_secs(self.timeout),
            retries: self.retries,
            default_order: self.default_order,
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "podcasts", "podcasts").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("podcasts");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from `path` + environment. A missing file is not an
/// error; defaults fill every field it would have set.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
