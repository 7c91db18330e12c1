//! Configuration loading for the onboarding client.
//!
//! Loads layered `.env` files and environment variables prefixed with
//! `ONBOARD_`, producing a typed [`AppConfig`].

use std::{collections::BTreeMap, env, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const ENV_PREFIX: &str = "ONBOARD_";

/// Application configuration derived from `ONBOARD_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// Endpoint of the background account service
    #[serde(default = "default_account_service_url")]
    pub account_service_url: String,
    /// Per-call timeout enforced by the transport
    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,
    /// Display label given to accounts registered by this flow
    #[serde(default = "default_node_profile_name")]
    pub node_profile_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            account_service_url: default_account_service_url(),
            call_timeout_ms: default_call_timeout_ms(),
            node_profile_name: default_node_profile_name(),
        }
    }
}

impl AppConfig {
    /// Returns the account service endpoint as a parsed URL.
    pub fn service_url(&self) -> Result<Url, ConfigError> {
        let url =
            Url::parse(&self.account_service_url).map_err(|err| ConfigError::InvalidServiceUrl {
                value: self.account_service_url.clone(),
                reason: err.to_string(),
            })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidServiceUrl {
                value: self.account_service_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Ok(url)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    /// Returns a redacted JSON representation (credentials in the service url are redacted).
    pub fn redacted_json(&self) -> serde_json::Result<String> {
        let mut config = self.clone();
        if let Ok(mut url) = Url::parse(&config.account_service_url)
            && (!url.username().is_empty() || url.password().is_some())
        {
            let _ = url.set_username("[REDACTED]");
            let _ = url.set_password(None);
            config.account_service_url = url.to_string();
        }
        serde_json::to_string_pretty(&config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service_url()?;

        if self.call_timeout_ms == 0 {
            return Err(ConfigError::InvalidCallTimeout {
                value: self.call_timeout_ms,
            });
        }

        if self.node_profile_name.trim().is_empty() {
            return Err(ConfigError::EmptyNodeProfileName);
        }

        if !matches!(self.log_format.as_str(), "json" | "pretty") {
            return Err(ConfigError::InvalidLogFormat {
                value: self.log_format.clone(),
            });
        }

        Ok(())
    }
}

fn default_profile() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_account_service_url() -> String {
    "http://127.0.0.1:8080/rpc".to_string()
}

fn default_call_timeout_ms() -> u64 {
    30_000
}

fn default_node_profile_name() -> String {
    "RaspiBlitz".to_string()
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("invalid account service url '{value}': {reason}")]
    InvalidServiceUrl { value: String, reason: String },
    #[error("invalid call timeout {value}ms; must be greater than zero")]
    InvalidCallTimeout { value: u64 },
    #[error("node profile name must not be empty; set ONBOARD_NODE_PROFILE_NAME")]
    EmptyNodeProfileName,
    #[error("invalid log format '{value}'; expected 'json' or 'pretty'")]
    InvalidLogFormat { value: String },
}

/// Loads configuration using layered `.env` files and `ONBOARD_*` env vars.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Loads `.env`, `.env.local`, `.env.{profile}`, `.env.{profile}.local`, then the
    /// process environment, later layers winning.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let (mut layered, profile_hint) = self.collect_layered_env()?;

        // Overlay process environment last so it wins.
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                layered.insert(stripped.to_string(), value);
            }
        }

        let profile = layered
            .remove("PROFILE")
            .filter(|v| !v.is_empty())
            .unwrap_or(profile_hint);
        let log_level = layered
            .remove("LOG_LEVEL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_level);
        let log_format = layered
            .remove("LOG_FORMAT")
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_log_format);
        let account_service_url = layered
            .remove("ACCOUNT_SERVICE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_account_service_url);
        let call_timeout_ms = layered
            .remove("CALL_TIMEOUT_MS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_else(default_call_timeout_ms);
        let node_profile_name = layered
            .remove("NODE_PROFILE_NAME")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_node_profile_name);

        let config = AppConfig {
            profile,
            log_level,
            log_format,
            account_service_url,
            call_timeout_ms,
            node_profile_name,
        };

        config.validate()?;
        Ok(config)
    }

    fn collect_layered_env(&self) -> Result<(BTreeMap<String, String>, String), ConfigError> {
        let mut values = BTreeMap::new();

        self.merge_dotenv(self.base_dir.join(".env"), &mut values)?;
        self.merge_dotenv(self.base_dir.join(".env.local"), &mut values)?;

        let profile = env::var(format!("{ENV_PREFIX}PROFILE"))
            .ok()
            .or_else(|| values.get("PROFILE").cloned())
            .unwrap_or_else(default_profile);

        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}", &profile)),
            &mut values,
        )?;
        self.merge_dotenv(
            self.base_dir.join(format!(".env.{}.local", &profile)),
            &mut values,
        )?;

        Ok((values, profile))
    }

    fn merge_dotenv(
        &self,
        path: PathBuf,
        values: &mut BTreeMap<String, String>,
    ) -> Result<(), ConfigError> {
        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                        values.insert(stripped.to_string(), value);
                    }
                }
                Ok(())
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(())
            }
            Err(err) => Err(ConfigError::EnvFile { path, source: err }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
