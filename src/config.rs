use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::common::constants::{
    KOPIS_API_KEY_ENV, KOPIS_BASE_URL, NAVER_CLIENT_ID_ENV, NAVER_CLIENT_SECRET_ENV,
    NAVER_MAPS_BASE_URL, PAGE_SIZE, REGISTRY_ROWS,
};
use crate::common::error::{Result, ShowMapError};

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub registry: RegistryConfig,
    pub geocoder: GeocoderConfig,
    pub paging: PagingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub rows: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { base_url: KOPIS_BASE_URL.to_string(), api_key: None, rows: REGISTRY_ROWS }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self { base_url: NAVER_MAPS_BASE_URL.to_string(), client_id: None, client_secret: None }
    }
}

impl GeocoderConfig {
    /// Both halves of the credential, when present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.client_id.as_deref()?, self.client_secret.as_deref()?))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    pub page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self { page_size: PAGE_SIZE }
    }
}

impl Config {
    /// Loads `config.toml` if it exists, then applies credentials from the
    /// environment (and a `.env` file). Missing credentials are not an error.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        let mut config = Self::from_file(CONFIG_PATH)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(path).map_err(|e| {
            ShowMapError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Environment values win over the file; blank values count as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(key) = read(KOPIS_API_KEY_ENV) {
            self.registry.api_key = Some(key);
        }
        if let Some(id) = read(NAVER_CLIENT_ID_ENV) {
            self.geocoder.client_id = Some(id);
        }
        if let Some(secret) = read(NAVER_CLIENT_SECRET_ENV) {
            self.geocoder.client_secret = Some(secret);
        }

        if self.registry.api_key.is_none() {
            warn!("{} is not set; listings will always be empty", KOPIS_API_KEY_ENV);
        }
    }
}
