use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_preference_api_url")]
    pub preference_api_url: String,

    #[serde(default = "default_summarizer_url")]
    pub summarizer_url: String,

    #[serde(default = "default_news_api_url")]
    pub news_api_url: String,

    /// Tried in order on every fetch; each key is assumed to have its own rate limit.
    #[serde(default)]
    pub news_api_keys: Vec<String>,

    #[serde(default = "default_country")]
    pub default_country: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newsdesk");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("preferences.db").to_string_lossy().to_string()
}

fn default_preference_api_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_summarizer_url() -> String {
    "http://127.0.0.1:5002".to_string()
}

fn default_news_api_url() -> String {
    "https://newsapi.org".to_string()
}

fn default_country() -> String {
    "us".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            preference_api_url: default_preference_api_url(),
            summarizer_url: default_summarizer_url(),
            news_api_url: default_news_api_url(),
            news_api_keys: Vec::new(),
            default_country: default_country(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("newsdesk")
            .join("config.toml")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn news_api(&self) -> NewsApiConfig {
        NewsApiConfig {
            base_url: self.news_api_url.clone(),
            credentials: self.news_api_keys.iter().cloned().map(Credential::new).collect(),
            timeout: self.request_timeout(),
        }
    }
}

/// Upstream news provider settings handed to the headline fetcher.
#[derive(Debug, Clone)]
pub struct NewsApiConfig {
    pub base_url: String,
    pub credentials: Vec<Credential>,
    pub timeout: Duration,
}

/// An access token for the news provider. Debug output never shows the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}
