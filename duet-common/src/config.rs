//! Configuration loading
//!
//! Bootstrap settings come from a TOML file. Every field has a built-in
//! default, so a missing file (or a file that sets only a few keys) still
//! yields a usable configuration.
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `DUET_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/duet/config.toml`)
//! 4. Built-in defaults (fallback)
//!
//! A missing file is never fatal: a warning is logged and defaults are used.
//! A file that exists but does not parse is a [`Error::Config`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::memory::SYMBOLS;
use crate::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "DUET_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub games: GamesConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Game limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamesConfig {
    /// Longest accepted free-text quiz answer, in characters
    #[serde(default = "default_text_answer_max_len")]
    pub text_answer_max_len: usize,

    /// Maximum number of live game sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Pairs dealt on a new memory-match board
    #[serde(default = "default_memory_pairs")]
    pub memory_pairs: usize,

    /// Seconds without activity before a session may be evicted
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5740
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_text_answer_max_len() -> usize {
    100
}

fn default_max_sessions() -> usize {
    256
}

fn default_memory_pairs() -> usize {
    crate::memory::DEFAULT_PAIRS
}

fn default_session_idle_secs() -> u64 {
    3600
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logging: LoggingConfig::default(),
            games: GamesConfig::default(),
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

impl Default for GamesConfig {
    fn default() -> Self {
        Self {
            text_answer_max_len: default_text_answer_max_len(),
            max_sessions: default_max_sessions(),
            memory_pairs: default_memory_pairs(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl TomlConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }
        if self.games.text_answer_max_len == 0 {
            return Err(Error::Config(
                "games.text_answer_max_len must be at least 1".to_string(),
            ));
        }
        if self.games.max_sessions == 0 {
            return Err(Error::Config(
                "games.max_sessions must be at least 1".to_string(),
            ));
        }
        if self.games.session_idle_secs == 0 {
            return Err(Error::Config(
                "games.session_idle_secs must be at least 1".to_string(),
            ));
        }
        if self.games.memory_pairs == 0 || self.games.memory_pairs > SYMBOLS.len() {
            return Err(Error::Config(format!(
                "games.memory_pairs must be between 1 and {}",
                SYMBOLS.len()
            )));
        }
        Ok(())
    }
}

/// Load a config file
///
/// # Errors
/// [`Error::Io`] if the file cannot be read, [`Error::Config`] if it does
/// not parse or fails validation.
pub fn load_config_file(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    TomlConfig::from_toml_str(&content)
}

/// Platform default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("duet").join("config.toml"))
}

/// Where the config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    PlatformDefault(PathBuf),
    /// A file was requested but does not exist; built-in defaults in use
    Missing(PathBuf),
    BuiltIn,
}

/// Resolves and loads the config file following the priority order above
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Pick the config file location, without reading it
    pub fn resolve(&self) -> ConfigSource {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_path {
            return ConfigSource::CommandLine(path.clone());
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return ConfigSource::Environment(PathBuf::from(path));
            }
        }

        // Priority 3: Platform config directory
        if let Some(path) = default_config_path() {
            if path.exists() {
                return ConfigSource::PlatformDefault(path);
            }
        }

        // Priority 4: Built-in defaults
        ConfigSource::BuiltIn
    }

    /// Load the resolved config
    ///
    /// A requested file that does not exist falls back to built-in defaults
    /// with a warning and is reported as [`ConfigSource::Missing`].
    pub fn load(&self) -> Result<(TomlConfig, ConfigSource)> {
        let source = self.resolve();
        let path = match &source {
            ConfigSource::CommandLine(p)
            | ConfigSource::Environment(p)
            | ConfigSource::PlatformDefault(p) => p.clone(),
            ConfigSource::Missing(_) | ConfigSource::BuiltIn => {
                debug!("No config file found, using built-in defaults");
                return Ok((TomlConfig::default(), source));
            }
        };

        if !path.exists() {
            warn!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            return Ok((TomlConfig::default(), ConfigSource::Missing(path)));
        }

        let config = load_config_file(&path)?;
        info!("Loaded config from {}", path.display());
        Ok((config, source))
    }
}
