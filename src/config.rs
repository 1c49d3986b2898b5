use std::{env, time::Duration};

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealweek_mealplan::SessionStore;
use mealweek_shopping::ExportNaming;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub generation: GenerationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Full url of the `/api/generate` endpoint
    pub url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_log_file")]
    pub file: String,
    #[serde(default = "default_log_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_log_backup_count")]
    pub backup_count: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: default_log_file(),
            max_bytes: default_log_max_bytes(),
            backup_count: default_log_backup_count(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "meal_planner.log".to_string()
}

fn default_log_max_bytes() -> u64 {
    10_000
}

fn default_log_backup_count() -> usize {
    1
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Where generated shopping lists are saved server-side
    #[serde(default = "default_export_directory")]
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_prefix: default_filename_prefix(),
            timestamp_format: default_timestamp_format(),
            directory: default_export_directory(),
        }
    }
}

impl ExportConfig {
    pub fn naming(&self) -> ExportNaming {
        ExportNaming {
            prefix: self.filename_prefix.to_owned(),
            timestamp_format: self.timestamp_format.to_owned(),
        }
    }
}

fn default_filename_prefix() -> String {
    "shopping_list".to_string()
}

fn default_timestamp_format() -> String {
    mealweek_shopping::DEFAULT_TIMESTAMP_FORMAT.to_string()
}

fn default_export_directory() -> String {
    ".".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Seconds a planning session may stay unused before it is dropped
    #[serde(default = "default_session_idle_ttl_secs")]
    pub idle_ttl_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: default_session_idle_ttl_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl SessionConfig {
    pub fn store(&self) -> SessionStore {
        SessionStore::with_limits(Duration::from_secs(self.idle_ttl_secs), self.max_sessions)
    }
}

fn default_session_idle_ttl_secs() -> u64 {
    mealweek_mealplan::DEFAULT_IDLE_TTL.as_secs()
}

fn default_max_sessions() -> usize {
    mealweek_mealplan::DEFAULT_MAX_SESSIONS
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (OLLAMA_URL, OLLAMA_MODEL, OLLAMA_TIMEOUT)
    /// 2. Environment variables (MEALWEEK__GENERATION__MODEL, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("generation.url", "http://localhost:11434/api/generate")?
            .set_default("generation.model", "llama3.2")?
            .set_default("generation.timeout_secs", 30)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALWEEK")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(url) = env::var("OLLAMA_URL") {
            builder = builder.set_override("generation.url", url)?;
        }
        if let Ok(model) = env::var("OLLAMA_MODEL") {
            builder = builder.set_override("generation.model", model)?;
        }
        if let Ok(timeout) = env::var("OLLAMA_TIMEOUT") {
            builder = builder.set_override("generation.timeout_secs", timeout)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.generation.timeout_secs == 0 {
            return Err("Generation timeout must be at least 1 second".to_string());
        }
        if self.generation.model.trim().is_empty() {
            return Err("Generation model must not be empty".to_string());
        }
        if self.export.filename_prefix.trim().is_empty() {
            return Err("Export filename prefix must not be empty".to_string());
        }
        self.export.naming().validate().map_err(|e| e.to_string())?;
        if self.logging.max_bytes == 0 {
            return Err("Log max_bytes must be greater than 0".to_string());
        }
        if self.session.idle_ttl_secs == 0 {
            return Err("Session idle_ttl_secs must be greater than 0".to_string());
        }
        if self.session.max_sessions == 0 {
            return Err("Session max_sessions must be greater than 0".to_string());
        }
        Ok(())
    }
}
