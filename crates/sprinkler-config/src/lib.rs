//! Configuration for the sprinkler CLI.
//!
//! TOML profiles naming the controller to talk to, layered with figment
//! (defaults, then the config file, then `SPRINKLER_*` environment
//! variables), and translation to a ready-to-use [`DeviceConfig`].
//! Command-line flags are applied on top by the binary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sprinkler_api::TransportConfig;

/// Controller host used when no profile names one (the device's mDNS name).
pub const DEFAULT_DEVICE_HOST: &str = "sprinklers.local";

const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

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

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named controllers.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Request timeout in seconds; `0` disables it.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// A named controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Host name or address, optionally with `:port`.
    pub host: String,

    /// Override timeout.
    pub timeout: Option<u64>,
}

/// Everything needed to build an `ApiInvoker`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub host: String,
    pub timeout: Option<Duration>,
}

impl DeviceConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "sprinklers", "sprinkler").map_or_else(
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
    p.push("sprinkler");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// A missing file is not an error; it simply contributes nothing.
/// Nested keys come from the environment with a double underscore,
/// e.g. `SPRINKLER_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SPRINKLER_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
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

// ── Profile resolution ──────────────────────────────────────────────

impl Config {
    /// The profile to use: the requested one, else the configured default.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.into())
    }

    /// Resolve the controller to talk to.
    ///
    /// An explicitly requested profile must exist. When none was requested
    /// and the default profile is absent, the controller's mDNS name is used.
    pub fn resolve_device(&self, requested: Option<&str>) -> Result<DeviceConfig, ConfigError> {
        let name = self.active_profile_name(requested);

        let (host, timeout) = match self.profiles.get(&name) {
            Some(profile) => (profile.host.clone(), profile.timeout),
            None if requested.is_some() => {
                return Err(ConfigError::ProfileNotFound {
                    name,
                    available: self.profile_names().join(", "),
                });
            }
            None => (DEFAULT_DEVICE_HOST.to_owned(), None),
        };

        validate_host(&host)?;

        let secs = timeout.unwrap_or(self.defaults.timeout);
        Ok(DeviceConfig {
            host,
            timeout: (secs > 0).then_some(Duration::from_secs(secs)),
        })
    }

    /// Create or update a profile's host.
    pub fn set_host(&mut self, profile: &str, host: &str) -> Result<(), ConfigError> {
        validate_host(host)?;
        self.profiles
            .entry(profile.to_owned())
            .and_modify(|p| host.clone_into(&mut p.host))
            .or_insert_with(|| Profile {
                host: host.to_owned(),
                timeout: None,
            });
        Ok(())
    }

    /// Profile names, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// A host is what goes between `http://` and the path.
pub fn validate_host(host: &str) -> Result<(), ConfigError> {
    let reason = if host.trim().is_empty() {
        "must not be empty"
    } else if host.contains("://") {
        "expected a host name or address, not a URL"
    } else if host.contains('/') {
        "must not contain a path"
    } else {
        return Ok(());
    };

    Err(ConfigError::Validation {
        field: "host".into(),
        reason: reason.into(),
    })
}
