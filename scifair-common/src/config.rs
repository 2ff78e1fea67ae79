//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration only: where the data lives, which port to listen
//! on, how to reach the advisor and how loud to log. Root folder priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable `SCIFAIR_ROOT_FOLDER`
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or unreadable config file is logged and replaced by defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "SCIFAIR_ROOT_FOLDER";

/// Environment variable carrying the advisor (OpenAI) key
pub const ADVISOR_KEY_ENV: &str = "OPENAI_API_KEY";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "scifair.db";

/// Blob directory name inside the root folder
pub const BLOB_DIR_NAME: &str = "blobs";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding the database and uploaded blobs
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Base URL used when building durable blob URLs.
    /// Defaults to `http://<bind_address>:<port>`.
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Static key clients must send in the `apikey` header (unset = not checked)
    #[serde(default)]
    pub client_api_key: Option<String>,

    #[serde(default)]
    pub advisor: AdvisorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Language model endpoint settings
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_advisor_base_url")]
    pub base_url: String,

    #[serde(default = "default_advisor_model")]
    pub model: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_advisor_timeout_secs")]
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` wins when set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_port() -> u16 {
    5740
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_advisor_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_advisor_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_advisor_timeout_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_advisor_base_url(),
            model: default_advisor_model(),
            timeout_secs: default_advisor_timeout_secs(),
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

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            port: default_port(),
            bind_address: default_bind_address(),
            public_base_url: None,
            client_api_key: None,
            advisor: AdvisorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Parse a config file, failing on I/O or syntax errors
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    /// Load `explicit` (or the default location); fall back to defaults with a warning
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => path,
            None => {
                warn!("Could not determine config directory, using built-in defaults");
                return Self::default();
            }
        };

        if !path.exists() {
            if explicit.is_some() {
                warn!("Config file {} not found, using built-in defaults", path.display());
            } else {
                info!("No config file at {}, using built-in defaults", path.display());
            }
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{} - using built-in defaults", e);
                Self::default()
            }
        }
    }

    /// Base URL for blob links
    pub fn public_base_url(&self) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.bind_address, self.port))
            .trim_end_matches('/')
            .to_string()
    }

    /// Client key, ignoring blank values
    pub fn client_api_key(&self) -> Option<String> {
        self.client_api_key.clone().filter(|k| is_valid_key(k))
    }
}

/// `<config_dir>/scifair/scifair.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("scifair").join("scifair.toml"))
}

/// Keys must be non-empty and not whitespace-only
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve the advisor key: environment first, then TOML
pub fn resolve_advisor_api_key(config: &TomlConfig) -> Result<String> {
    if let Ok(key) = std::env::var(ADVISOR_KEY_ENV) {
        if is_valid_key(&key) {
            info!("Advisor API key loaded from environment variable");
            return Ok(key);
        }
    }

    if let Some(key) = config.advisor.api_key.as_ref().filter(|k| is_valid_key(k)) {
        info!("Advisor API key loaded from TOML config");
        return Ok(key.clone());
    }

    Err(Error::Config(format!(
        "Advisor API key not configured. Set {} or [advisor] api_key in the config file",
        ADVISOR_KEY_ENV
    )))
}

/// Platform defaults used when nothing else is configured
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub port: u16,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        let root_folder = dirs::data_local_dir()
            .map(|d| d.join("scifair"))
            .unwrap_or_else(|| PathBuf::from("./scifair_data"));

        Self {
            root_folder,
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

/// Resolves the root folder from CLI, environment, TOML and defaults
#[derive(Debug, Clone, Default)]
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
    toml_root: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    pub fn with_toml(mut self, config: &TomlConfig) -> Self {
        self.toml_root = config.root_folder.clone();
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_root {
            return path.clone();
        }

        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Creates the root folder layout on first run
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            info!("Creating root folder: {}", self.root_folder.display());
        }
        std::fs::create_dir_all(self.blob_dir())?;
        Ok(())
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }

    pub fn blob_dir(&self) -> PathBuf {
        self.root_folder.join(BLOB_DIR_NAME)
    }
}
