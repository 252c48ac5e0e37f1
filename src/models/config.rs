//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Environment variables that override file settings.
pub mod env_keys {
    pub const PUSH_API_KEY: &str = "PUSH_API_KEY";
    pub const ARCHIVE_API_KEY: &str = "ARCHIVE_API_KEY";
    pub const ARCHIVE_BASE_URL: &str = "ARCHIVE_BASE_URL";
    pub const PUSH_ENDPOINT: &str = "PUSH_ENDPOINT";
    pub const PUSH_TOPIC: &str = "PUSH_TOPIC";
    pub const POLL_INTERVAL_SECS: &str = "POLL_INTERVAL_SECS";
    pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
}

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Upstream concert archive
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Push notification service
    #[serde(default)]
    pub push: PushConfig,

    /// Poll loop timing
    #[serde(default)]
    pub poll: PollConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, using defaults when the file does not exist.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("Config file {:?} not found. Using defaults.", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(env_keys::PUSH_API_KEY) {
            self.push.api_key = Some(ApiKey::new(key));
        }
        if let Some(key) = lookup(env_keys::ARCHIVE_API_KEY) {
            self.archive.api_key = Some(ApiKey::new(key));
        }
        if let Some(url) = lookup(env_keys::ARCHIVE_BASE_URL) {
            self.archive.base_url = url;
        }
        if let Some(url) = lookup(env_keys::PUSH_ENDPOINT) {
            self.push.endpoint = url;
        }
        if let Some(topic) = lookup(env_keys::PUSH_TOPIC) {
            self.push.topic = topic;
        }
        if let Some(secs) = lookup(env_keys::POLL_INTERVAL_SECS) {
            self.poll.interval_secs = parse_number(env_keys::POLL_INTERVAL_SECS, &secs)?;
        }
        if let Some(secs) = lookup(env_keys::HTTP_TIMEOUT_SECS) {
            self.http.timeout_secs = parse_number(env_keys::HTTP_TIMEOUT_SECS, &secs)?;
        }
        Ok(())
    }

    /// Validate configuration values before the poll loop starts.
    pub fn validate(&self) -> Result<()> {
        match &self.push.api_key {
            Some(key) if !key.is_blank() => {}
            _ => {
                return Err(AppError::config(format!(
                    "push.api_key is missing (set it in the config file or {})",
                    env_keys::PUSH_API_KEY
                )));
            }
        }
        http_url("archive.base_url", &self.archive.base_url)?;
        http_url("push.endpoint", &self.push.endpoint)?;
        if self.push.topic.trim().is_empty() {
            return Err(AppError::config("push.topic is empty"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        if self.poll.interval_secs == 0 {
            return Err(AppError::config("poll.interval_secs must be > 0"));
        }
        if self.poll.max_shows_per_tick == 0 {
            return Err(AppError::config("poll.max_shows_per_tick must be > 0"));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::config(format!("{key} must be a positive integer, got {value:?}")))
}

/// Parse a URL and require an http(s) scheme.
pub fn http_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| AppError::config(format!("{field} is not a valid URL ({value}): {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::config(format!(
            "{field} must use http or https, got {other}"
        ))),
    }
}

/// A secret key that never shows up in logs or debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for building request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Upstream concert archive settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Base URL of the archive
    #[serde(default = "defaults::archive_base_url")]
    pub base_url: String,

    /// Path of the per-year show count listing
    #[serde(default = "defaults::years_path")]
    pub years_path: String,

    /// Path of the show listing
    #[serde(default = "defaults::shows_path")]
    pub shows_path: String,

    /// Bearer token for the archive, if it requires one
    #[serde(default)]
    pub api_key: Option<ApiKey>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::archive_base_url(),
            years_path: defaults::years_path(),
            shows_path: defaults::shows_path(),
            api_key: None,
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Push notification service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Send endpoint of the push service
    #[serde(default = "defaults::push_endpoint")]
    pub endpoint: String,

    /// Broadcast topic every message goes to
    #[serde(default = "defaults::topic")]
    pub topic: String,

    /// Server key sent as `Authorization: key=...`
    #[serde(default)]
    pub api_key: Option<ApiKey>,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::push_endpoint(),
            topic: defaults::topic(),
            api_key: None,
        }
    }
}

/// Poll loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between polls
    #[serde(default = "defaults::interval")]
    pub interval_secs: u64,

    /// Upper bound on shows looked up and announced in one tick
    #[serde(default = "defaults::max_shows_per_tick")]
    pub max_shows_per_tick: usize,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::interval(),
            max_shows_per_tick: defaults::max_shows_per_tick(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when RUST_LOG is not set
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Archive defaults
    pub fn archive_base_url() -> String {
        "https://phish.in".into()
    }
    pub fn years_path() -> String {
        "/api/v1/years.json".into()
    }
    pub fn shows_path() -> String {
        "/api/v1/shows.json".into()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        concat!("show-notifier/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Push defaults
    pub fn push_endpoint() -> String {
        "https://fcm.googleapis.com/fcm/send".into()
    }
    pub fn topic() -> String {
        "/topics/global".into()
    }

    // Poll defaults
    pub fn interval() -> u64 {
        30 * 60
    }
    pub fn max_shows_per_tick() -> usize {
        100
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
