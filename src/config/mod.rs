use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::{validate_base_url, validate_config};

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the Sleeper API.
    #[serde(default = "default_sleeper_api_base")]
    pub sleeper_api_base: String,
    /// Base URL of the LLM completion API.
    #[serde(default = "default_llm_api_base")]
    pub llm_api_base: String,
    /// Base URL of the FantasyPros projections pages.
    #[serde(default = "default_fantasypros_base")]
    pub fantasypros_base: String,
    /// League used when `--league-id` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league_id: Option<String>,
    /// Site root; data files are written to `<docs_dir>/data`.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,
    /// Completion model used when `--model` is not given.
    #[serde(default = "default_model")]
    pub model: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_sleeper_api_base() -> String {
    constants::SLEEPER_API_BASE.to_string()
}

fn default_llm_api_base() -> String {
    constants::LLM_API_BASE.to_string()
}

fn default_fantasypros_base() -> String {
    constants::FANTASYPROS_BASE.to_string()
}

fn default_docs_dir() -> String {
    constants::DEFAULT_DOCS_DIR.to_string()
}

fn default_model() -> String {
    constants::DEFAULT_MODEL.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sleeper_api_base: default_sleeper_api_base(),
            llm_api_base: default_llm_api_base(),
            fantasypros_base: default_fantasypros_base(),
            league_id: None,
            docs_dir: default_docs_dir(),
            model: default_model(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Falls back to defaults when no config file exists; the file is only
    /// written by the `config` command.
    ///
    /// # Environment Variables
    /// - `SLEEPER_SITE_API_BASE` - Override Sleeper API base URL
    /// - `SLEEPER_SITE_LLM_API_BASE` - Override LLM API base URL
    /// - `SLEEPER_SITE_FANTASYPROS_BASE` - Override FantasyPros projections base URL
    /// - `SLEEPER_SITE_LEAGUE_ID` - Override default league id
    /// - `SLEEPER_SITE_LOG_FILE` - Override log file path
    /// - `SLEEPER_SITE_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration from a custom file path without applying
    /// environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Applies `SLEEPER_SITE_*` environment variables on top of the loaded values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base) = std::env::var(env_vars::API_BASE) {
            self.sleeper_api_base = base;
        }

        if let Ok(base) = std::env::var(env_vars::LLM_API_BASE) {
            self.llm_api_base = base;
        }

        if let Ok(base) = std::env::var(env_vars::FANTASYPROS_BASE) {
            self.fantasypros_base = base;
        }

        if let Ok(league_id) = std::env::var(env_vars::LEAGUE_ID) {
            self.league_id = Some(league_id);
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_base_url("FantasyPros base", &self.fantasypros_base)?;
        validate_config(
            &self.sleeper_api_base,
            &self.llm_api_base,
            &self.league_id,
            self.http_timeout_seconds,
            &self.log_file_path,
        )
    }

    /// Picks the league id from the command line, falling back to the config.
    pub fn resolve_league_id(&self, from_cli: Option<&str>) -> Result<String, AppError> {
        from_cli
            .map(str::to_string)
            .or_else(|| self.league_id.clone())
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                AppError::config_error(format!(
                    "No league id given: pass --league-id, set {} or run `config --set-league-id`",
                    env_vars::LEAGUE_ID
                ))
            })
    }

    /// Picks the site root from the command line, falling back to the config.
    pub fn resolve_docs_dir(&self, from_cli: Option<&str>) -> String {
        from_cli
            .map(str::to_string)
            .unwrap_or_else(|| self.docs_dir.clone())
    }

    /// Picks the completion model from the command line, falling back to the config.
    pub fn resolve_model(&self, from_cli: Option<&str>) -> String {
        from_cli
            .map(str::to_string)
            .unwrap_or_else(|| self.model.clone())
    }

    /// Reads the LLM API key from the process environment.
    pub fn llm_api_key() -> Result<String, AppError> {
        std::env::var(env_vars::LLM_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::missing_api_key(env_vars::LLM_API_KEY))
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Handles case when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if !Path::new(&config_path).exists() {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("(Using built-in defaults)");
        }

        let config = Config::load().await?;
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("Sleeper API:");
        println!("{}", config.sleeper_api_base);
        println!("────────────────────────────────────");
        println!("LLM API:");
        println!("{}", config.llm_api_base);
        println!("Model: {}", config.model);
        println!("────────────────────────────────────");
        println!("FantasyPros:");
        println!("{}", config.fantasypros_base);
        println!("────────────────────────────────────");
        println!("League:");
        println!("{}", config.league_id.as_deref().unwrap_or("(not set)"));
        println!("────────────────────────────────────");
        println!("Docs Directory:");
        println!("{}", config.docs_dir);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/sleeper_site.log");
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path, creating the parent
    /// directory when needed.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
