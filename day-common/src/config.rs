//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from a small TOML file. A missing or unreadable
//! file is never fatal: callers log a warning and run on defaults.
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable `DAY_ROOT_FOLDER`
//! 3. TOML `root_folder`
//! 4. OS-dependent default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default HTTP port for day-web
pub const DEFAULT_PORT: u16 = 5780;

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "DAY_ROOT_FOLDER";

/// Environment variable overriding the backend shared secret
pub const BACKEND_SECRET_ENV: &str = "API_BACKEND_SECRET";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "day.db";

const APP_DIR: &str = "day-site";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the database (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared secret required by the sketch routes
    #[serde(default)]
    pub api_backend_secret: Option<String>,

    /// Hosted search index settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hosted search index settings
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Application id; without it the service uses an empty in-memory index
    #[serde(default)]
    pub app_id: Option<String>,

    /// Search-only API key
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_index_name")]
    pub index_name: String,

    #[serde(default = "default_hits_per_page")]
    pub hits_per_page: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_index_name() -> String {
    "events".to_string()
}

fn default_hits_per_page() -> u32 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            host: default_host(),
            port: default_port(),
            api_backend_secret: None,
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            api_key: None,
            index_name: default_index_name(),
            hits_per_page: default_hits_per_page(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TomlConfig {
    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load from a file, failing if it is missing or malformed
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if it exists
    ///
    /// `Ok(None)` means there is no file; a file that exists but cannot be
    /// read or parsed is an error.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Backend secret, environment first
    ///
    /// Empty values count as unset.
    pub fn backend_secret(&self) -> Option<String> {
        std::env::var(BACKEND_SECRET_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.api_backend_secret.clone())
            .filter(|s| !s.is_empty())
    }
}

/// Platform config file location (`<config dir>/day-site/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Resolve the root folder per the priority order in the module docs
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent default
    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./day_data"))
}

/// Database location inside a root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}
