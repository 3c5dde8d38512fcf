use bookshelf_api::{ClientConfig, DEFAULT_API_PREFIX, DEFAULT_HOST};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AuthError;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Where the session is persisted. Defaults to the user cache directory.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            api_prefix: default_api_prefix(),
            timeout_ms: default_timeout_ms(),
            storage_dir: None,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("BOOKSHELF_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        Self::build(
            Config::builder()
                .add_source(File::with_name(&config_path).required(false))
                .add_source(config::Environment::with_prefix("BOOKSHELF").separator("__")),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("host is required".to_string());
        }
        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            return Err("host must be a valid HTTP(S) URL".to_string());
        }
        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            return Err("api_prefix must start with '/'".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            host: self.host.clone(),
            api_prefix: self.api_prefix.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }

    pub fn storage_dir(&self) -> Result<PathBuf, AuthError> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }
        dirs::cache_dir()
            .map(|dir| dir.join("bookshelf"))
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))
    }
}
