mod channels;


pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::BotError;

/// Env var holding the Telegram bot token.
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
/// Env var holding the Amazon associate tag.
pub const ENV_AMAZON_AFFILIATE_ID: &str = "AMAZON_AFFILIATE_ID";
/// Env var holding the AliExpress affiliate id.
pub const ENV_ALIEXPRESS_AFFILIATE_ID: &str = "ALIEXPRESS_AFFILIATE_ID";
/// Env var selecting the store backend (`kv` or `memory`).
pub const ENV_STORE_BACKEND: &str = "STORE_BACKEND";
/// Env var holding the KV service base URL.
pub const ENV_KV_BASE_URL: &str = "KV_BASE_URL";

/// Top-level dealbot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub affiliate: AffiliateConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Directory for daily rolling log files. Empty = stderr only.
    #[serde(default)]
    pub log_dir: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_dir: String::new(),
        }
    }
}

/// Affiliate identifiers embedded in generated search links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliateConfig {
    #[serde(default = "default_amazon_tag")]
    pub amazon_tag: String,
    #[serde(default)]
    pub aliexpress_id: String,
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            amazon_tag: default_amazon_tag(),
            aliexpress_id: String::new(),
        }
    }
}

/// Where tracked lists live.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Remote HTTP key-value service (default).
    #[default]
    Kv,
    /// Process memory. Lost on restart.
    Memory,
}

impl StoreBackend {
    /// Human-readable name for display (e.g. in `status`).
    pub fn display_name(&self) -> &str {
        match self {
            Self::Kv => "kv",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kv" => Ok(Self::Kv),
            "memory" => Ok(Self::Memory),
            other => Err(BotError::Config(format!(
                "unknown store backend '{other}' (expected 'kv' or 'memory')"
            ))),
        }
    }
}

/// Tracked-item store config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Base URL of the KV service, e.g. `https://kv.example.com`.
    #[serde(default)]
    pub base_url: String,
    /// Per-request timeout for KV calls, in seconds.
    #[serde(default = "default_store_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            base_url: String::new(),
            timeout_secs: default_store_timeout_secs(),
        }
    }
}

fn default_name() -> String {
    "dealbot".to_string()
}
fn default_amazon_tag() -> String {
    "YOUR_AFFILIATE_ID".to_string()
}
fn default_store_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) -> Result<(), BotError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(ENV_TELEGRAM_TOKEN) {
            self.telegram.bot_token = token;
        }
        if let Some(tag) = get(ENV_AMAZON_AFFILIATE_ID) {
            self.affiliate.amazon_tag = tag;
        }
        if let Some(id) = get(ENV_ALIEXPRESS_AFFILIATE_ID) {
            self.affiliate.aliexpress_id = id;
        }
        if let Some(backend) = get(ENV_STORE_BACKEND) {
            self.store.backend = backend.parse()?;
        }
        if let Some(base_url) = get(ENV_KV_BASE_URL) {
            self.store.base_url = base_url;
        }
        Ok(())
    }

    /// Check that every value needed to serve requests is present.
    pub fn validate(&self) -> Result<(), BotError> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(BotError::Config(format!(
                "telegram bot_token is empty. Set it in config.toml or {ENV_TELEGRAM_TOKEN} env var."
            )));
        }
        if self.affiliate.amazon_tag.trim().is_empty() {
            return Err(BotError::Config(format!(
                "affiliate amazon_tag is empty. Set it in config.toml or {ENV_AMAZON_AFFILIATE_ID} env var."
            )));
        }
        if self.affiliate.aliexpress_id.trim().is_empty() {
            return Err(BotError::Config(format!(
                "affiliate aliexpress_id is empty. Set it in config.toml or {ENV_ALIEXPRESS_AFFILIATE_ID} env var."
            )));
        }
        if self.store.backend == StoreBackend::Kv && self.store.base_url.trim().is_empty() {
            return Err(BotError::Config(format!(
                "store backend is 'kv' but base_url is empty. Set it in config.toml or {ENV_KV_BASE_URL} env var."
            )));
        }
        Ok(())
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// A missing file is not an error: defaults are returned so that a purely
/// env-configured deployment works without one. Env overrides are applied
/// by the caller.
pub fn load(path: &str) -> Result<Config, BotError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| BotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| BotError::Config(format!("failed to parse config: {}", e)))?;

    if !config.telegram.bot_token.is_empty() {
        warn!(
            "bot_token is stored in {}; prefer the {ENV_TELEGRAM_TOKEN} env var",
            path.display()
        );
    }

    Ok(config)
}
