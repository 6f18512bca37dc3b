//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub adapters: AdaptersConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub telegram: Option<TelegramConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TelegramConfig {
    pub enabled: bool,
    pub token: Option<String>,
    /// Long-poll timeout passed to getUpdates
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_seconds: u64,
    /// Pause after a failed getUpdates call
    #[serde(default = "default_error_backoff")]
    pub error_backoff_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Default tracing level; RUST_LOG directives still apply on top
    pub level: String,
}

/// Messaging adapter selected from the config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterKind {
    Telegram(String),
    Console,
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_error_backoff() -> u64 {
    5
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "families-bot".to_string(),
                prefix: "/".to_string(),
            },
            adapters: AdaptersConfig {
                telegram: Some(TelegramConfig {
                    enabled: false,
                    token: None,
                    poll_timeout_seconds: default_poll_timeout(),
                    error_backoff_seconds: default_error_backoff(),
                }),
                console: Some(ConsoleConfig {
                    enabled: true,
                }),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }
        if let Some(tg) = &self.adapters.telegram {
            if tg.enabled && tg.token.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::MissingField("adapters.telegram.token".to_string()));
            }
        }
        Ok(())
    }

    /// Adapter to run: Telegram when it has a token, otherwise the console
    pub fn adapter(&self) -> Result<AdapterKind, ConfigError> {
        if let Some(token) = self.telegram_token() {
            return Ok(AdapterKind::Telegram(token));
        }
        if self.adapters.console.as_ref().map_or(false, |c| c.enabled) {
            return Ok(AdapterKind::Console);
        }
        Err(ConfigError::InvalidValue(
            "no adapter enabled: set adapters.telegram.token or enable adapters.console".to_string(),
        ))
    }

    /// Token of the enabled Telegram adapter, if any
    pub fn telegram_token(&self) -> Option<String> {
        self.adapters.telegram
            .as_ref()
            .filter(|t| t.enabled)
            .and_then(|t| t.token.clone())
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override fields from BOT_TOKEN, BOT_PREFIX and BOT_LOG_LEVEL
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("BOT_TOKEN") {
            self.set_token(token);
        }

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            if !prefix.is_empty() {
                self.bot.prefix = prefix;
            }
        }

        if let Ok(level) = std::env::var("BOT_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Enable the Telegram adapter with the given token
    pub fn set_token(&mut self, token: String) {
        let tg = self.adapters.telegram.get_or_insert(TelegramConfig {
            enabled: true,
            token: None,
            poll_timeout_seconds: default_poll_timeout(),
            error_backoff_seconds: default_error_backoff(),
        });
        tg.token = Some(token);
        tg.enabled = true;
    }
}
