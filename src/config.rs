//! Service configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `WONDERBOARD_*` environment variables, then command-line flags (applied
//! by the binary).
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8080"
//!
//! [store]
//! backend = "file"
//! path = "/var/lib/wonderboard/data.json"
//!
//! [log]
//! level = "wonderboard=debug,tower_http=info"
//! json = true
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding [`ServerConfig::bind`].
pub const ENV_BIND: &str = "WONDERBOARD_BIND";
/// Environment variable overriding [`StoreConfig::path`].
pub const ENV_DATA: &str = "WONDERBOARD_DATA";
/// Environment variable overriding [`StoreConfig::backend`].
pub const ENV_STORE: &str = "WONDERBOARD_STORE";
/// Environment variable overriding [`LogConfig::level`].
pub const ENV_LOG: &str = "WONDERBOARD_LOG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`Config`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override holds an unusable value.
    #[error("invalid value {value:?} for {var}")]
    Env {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Storage backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-memory relational tables; nothing survives a restart.
    Memory,
    /// Single JSON document on disk.
    #[default]
    File,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::File => "file",
        })
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            _ => Err(format!("unknown store backend: {s}")),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
        }
    }
}

/// Repository settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Which backend to use.
    pub backend: Backend,
    /// Data file for the file backend.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            path: PathBuf::from("data.json"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Repository.
    pub store: StoreConfig,
    /// Logging.
    pub log: LogConfig,
}

impl Config {
    /// Parse a TOML document. Missing sections and keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or has values of
    /// the wrong type.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load defaults, the optional file at `path`, then environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an
    /// environment override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply `WONDERBOARD_*` overrides, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(ENV_BIND) {
            self.server.bind = value.parse().map_err(|_| ConfigError::Env {
                var: ENV_BIND,
                value,
            })?;
        }
        if let Some(value) = lookup(ENV_DATA) {
            self.store.path = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_STORE) {
            self.store.backend = value.parse().map_err(|_| ConfigError::Env {
                var: ENV_STORE,
                value,
            })?;
        }
        if let Some(value) = lookup(ENV_LOG) {
            self.log.level = value;
        }
        Ok(())
    }
}
