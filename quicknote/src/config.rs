//! Configuration management for QuickNote
//!
//! Values are layered, lowest precedence first:
//! 1. Built-in defaults
//! 2. `QUICKNOTE_*` environment variables
//! 3. A `quicknote.yaml` file
//!
//! Command-line flags are applied on top by the CLI.

use crate::common::env_loader::EnvLoader;
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "quicknote.yaml";
const ENV_PREFIX: &str = "QUICKNOTE";

/// Default address for the HTTP transport
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
/// Default public base URL used to build widget URIs
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Default directory holding persisted notes
pub const DEFAULT_DATA_DIR: &str = ".quicknote";
/// Default bound on a single storage backend call
pub const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 5_000;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file from disk
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        /// Path to the configuration file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML content from a configuration file
    #[error("Invalid YAML syntax in {path}:\n{source}\n\nHint: Check for proper indentation and YAML formatting")]
    YamlParse {
        /// Path to the configuration file with invalid YAML content
        path: PathBuf,
        /// Underlying YAML parsing error
        #[source]
        source: serde_yaml::Error,
    },

    /// Invalid configuration value for a specific field
    #[error("Invalid configuration value for '{field}': {value}\n{hint}")]
    InvalidValue {
        /// Name of the offending field
        field: String,
        /// The value that was provided
        value: String,
        /// How to fix it
        hint: String,
    },
}

/// Which storage backend holds the note collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// Process-local, lost on exit
    Memory,
    /// Single JSON document per key inside the data directory
    #[default]
    File,
    /// SQLite database inside the data directory
    Sqlite,
}

impl StorageBackendKind {
    /// Lowercase name as accepted in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" | "kv" => Ok(Self::File),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(ConfigError::InvalidValue {
                field: "storage".to_string(),
                value: s.to_string(),
                hint: "storage must be one of: memory, file, sqlite".to_string(),
            }),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Backend variant
    pub backend: StorageBackendKind,
    /// Directory for the file store and the SQLite database
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Path of the SQLite database file
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join("notes.db")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

/// Configuration settings for the QuickNote server and CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Socket address the HTTP transport binds to
    pub bind_addr: String,
    /// Public base URL; widget URIs are resolved against it
    pub base_url: String,
    /// Storage backend settings
    pub storage: StorageConfig,
    /// Upper bound on every backend call
    pub backend_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            storage: StorageConfig::default(),
            backend_timeout: Duration::from_millis(DEFAULT_BACKEND_TIMEOUT_MS),
        }
    }
}

impl Config {
    /// Build the configuration from defaults, `QUICKNOTE_*` environment
    /// variables and a YAML file: `path` when given, otherwise the first
    /// discovered `quicknote.yaml`.
    ///
    /// An unreadable or malformed file is an error whether it was named
    /// explicitly or discovered.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_vars();

        let yaml_config = match path {
            Some(path) => YamlConfig::load_from_file(path)?,
            None => YamlConfig::load_or_default()?,
        };
        yaml_config.apply_to_config(&mut config);

        config.validate()?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        let loader = EnvLoader::new(ENV_PREFIX);

        self.bind_addr = loader.load_string("BIND_ADDR", &self.bind_addr);
        self.base_url = loader.load_string("BASE_URL", &self.base_url);
        if let Some(dir) = loader.load_optional::<PathBuf>("DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Some(raw) = loader.load_optional::<String>("STORAGE") {
            match raw.parse() {
                Ok(kind) => self.storage.backend = kind,
                Err(e) => tracing::warn!("Ignoring {}_STORAGE: {}", ENV_PREFIX, e),
            }
        }
        let timeout_ms = loader.load_parsed(
            "BACKEND_TIMEOUT_MS",
            self.backend_timeout.as_millis() as u64,
        );
        self.backend_timeout = Duration::from_millis(timeout_ms);
    }

    /// Find `quicknote.yaml`, searching:
    /// 1. The current working directory
    /// 2. `~/.config/quicknote/quicknote.yaml`
    pub fn find_yaml_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(home_dir) = dirs::home_dir() {
            search_paths.push(
                home_dir
                    .join(".config")
                    .join("quicknote")
                    .join(CONFIG_FILE_NAME),
            );
        }

        let found = search_paths.into_iter().find(|path| path.is_file());
        match &found {
            Some(path) => tracing::debug!("Found configuration file: {:?}", path),
            None => tracing::debug!("No {} configuration file found", CONFIG_FILE_NAME),
        }
        found
    }

    /// Validate the current configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "bind_addr".to_string(),
                value: self.bind_addr.clone(),
                hint: "bind_addr must be a socket address such as 127.0.0.1:3000".to_string(),
            });
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                value: self.base_url.clone(),
                hint: "base_url must start with http:// or https://".to_string(),
            });
        }

        if self.backend_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "backend_timeout_ms".to_string(),
                value: "0".to_string(),
                hint: "backend_timeout_ms must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Example `quicknote.yaml` content
    pub fn example_yaml_config() -> &'static str {
        r#"# quicknote.yaml
bind_addr: "127.0.0.1:3000"
base_url: "http://localhost:3000"
storage: file          # memory | file | sqlite
data_dir: ".quicknote"
backend_timeout_ms: 5000
"#
    }
}

/// Configuration loaded from a `quicknote.yaml` file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct YamlConfig {
    /// HTTP bind address
    pub bind_addr: Option<String>,
    /// Public base URL
    pub base_url: Option<String>,
    /// Storage backend variant
    pub storage: Option<StorageBackendKind>,
    /// Data directory
    pub data_dir: Option<PathBuf>,
    /// Backend timeout in milliseconds
    pub backend_timeout_ms: Option<u64>,
}

impl YamlConfig {
    /// Apply YAML values to `config`; YAML wins over what is already there
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(ref bind_addr) = self.bind_addr {
            config.bind_addr = bind_addr.clone();
        }
        if let Some(ref base_url) = self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(storage) = self.storage {
            config.storage.backend = storage;
        }
        if let Some(ref data_dir) = self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        if let Some(ms) = self.backend_timeout_ms {
            config.backend_timeout = Duration::from_millis(ms);
        }
    }

    /// Load YAML configuration from a file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::info!("Loading YAML configuration from: {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load the discovered YAML file, or defaults if there is none
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Config::find_yaml_config_file() {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}
