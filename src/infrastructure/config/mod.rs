//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::application::services::event_loop::DEFAULT_POLL_TIMEOUT;
use crate::infrastructure::adapters::telegram;
use crate::infrastructure::weather;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub telegram: TelegramConfig,
    pub weather: WeatherConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    /// Long-poll window per getUpdates call
    pub poll_timeout_seconds: u64,
    /// Pause after a failed poll
    pub poll_error_delay_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TelegramConfig {
    pub token: Option<String>,
    pub api_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub geo_url: String,
    pub data_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DatabaseConfig {
    /// SQLite file path
    pub url: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "weather-bot".to_string(),
            poll_timeout_seconds: DEFAULT_POLL_TIMEOUT,
            poll_error_delay_seconds: 5,
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: telegram::API_BASE.to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geo_url: weather::GEO_API_BASE.to_string(),
            data_url: weather::DATA_API_BASE.to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: Some("weather-bot.db".to_string()),
        }
    }
}

/// Values the bot cannot start without
#[derive(Debug, Clone)]
pub struct Secrets<'a> {
    pub telegram_token: &'a str,
    pub weather_api_key: &'a str,
    pub database_url: &'a str,
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

    /// Override settings from `BOT_TOKEN`, `OPENWEATHERAPI_KEY` and `DATABASE_URL`
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup("BOT_TOKEN") {
            self.telegram.token = Some(token);
        }

        if let Some(key) = lookup("OPENWEATHERAPI_KEY") {
            self.weather.api_key = Some(key);
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
        }

        self
    }

    /// Check that every required setting is present
    pub fn secrets(&self) -> Result<Secrets<'_>, ConfigError> {
        fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ConfigError> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingField(name.to_string()))
        }

        if self.bot.poll_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue("bot.poll-timeout-seconds must be positive".to_string()));
        }

        Ok(Secrets {
            telegram_token: required(&self.telegram.token, "telegram.token (BOT_TOKEN)")?,
            weather_api_key: required(&self.weather.api_key, "weather.api-key (OPENWEATHERAPI_KEY)")?,
            database_url: required(&self.database.url, "database.url (DATABASE_URL)")?,
        })
    }
}
