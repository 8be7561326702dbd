//! Configuration management for the SDK
//!
//! This module provides utilities for loading and validating the SDK
//! configuration, with support for environment variables.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SdkError};
use crate::services::UserAgent;
use crate::util::parse_duration;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.nyris.io";

/// Default overall request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Default environment variable prefix
pub const ENV_PREFIX: &str = "VISUAL_SEARCH";

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a string configuration value
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Extension methods for configuration providers
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a typed configuration value by parsing from string
    fn get<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        <T as FromStr>::Err: std::fmt::Display,
    {
        let value = self.get_string(key)?;
        value
            .trim()
            .parse::<T>()
            .map_err(|e| SdkError::configuration(format!("Invalid value for key {}: {}", key, e)))
    }

    /// Get a boolean configuration value
    fn get_bool(&self, key: &str) -> Result<bool> {
        parse_bool_value(key, &self.get_string(key)?)
    }

    /// Get a duration such as "3000ms", "3s" or "1m"
    fn get_duration(&self, key: &str) -> Result<Duration> {
        parse_duration_value(key, &self.get_string(key)?)
    }

    /// Get a string configuration value, `None` when the key is not set
    fn get_optional_string(&self, key: &str) -> Option<String> {
        self.get_string(key).ok()
    }

    /// Get a boolean value, `None` when the key is not set
    ///
    /// A value that is set but malformed is an error.
    fn get_optional_bool(&self, key: &str) -> Result<Option<bool>> {
        self.get_optional_string(key)
            .map(|value| parse_bool_value(key, &value))
            .transpose()
    }

    /// Get a duration value, `None` when the key is not set
    ///
    /// A value that is set but malformed is an error.
    fn get_optional_duration(&self, key: &str) -> Result<Option<Duration>> {
        self.get_optional_string(key)
            .map(|value| parse_duration_value(key, &value))
            .transpose()
    }

    /// Get a string configuration value with a default
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get a boolean configuration value with a default
    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    /// Get a duration configuration value with a default
    fn get_duration_or(&self, key: &str, default: Duration) -> Duration {
        self.get_duration(key).unwrap_or(default)
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProviderExt for T {}

fn parse_bool_value(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(SdkError::configuration(format!(
            "Invalid boolean value for key {}: {}",
            key, value
        ))),
    }
}

fn parse_duration_value(key: &str, value: &str) -> Result<Duration> {
    parse_duration(value).ok_or_else(|| {
        SdkError::configuration(format!("Invalid duration for key {}: {}", key, value))
    })
}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    /// Optional prefix for environment variables
    prefix: Option<String>,

    /// Optional namespace for variables
    namespace: Option<String>,
}

impl EnvConfigProvider {
    /// Create a new environment variable config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix for environment variables
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set a namespace for environment variables
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Format a configuration key as an environment variable
    pub(crate) fn format_key(&self, key: &str) -> String {
        let mut env_key = String::new();

        if let Some(ref prefix) = self.prefix {
            env_key.push_str(prefix);
            env_key.push('_');
        }

        if let Some(ref namespace) = self.namespace {
            env_key.push_str(namespace);
            env_key.push('_');
        }

        // Uppercase, non-alphanumeric becomes underscore
        env_key.push_str(&key.to_uppercase().replace(|c: char| !c.is_ascii_alphanumeric(), "_"));

        env_key
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        env::var(&env_key).map_err(|e| match e {
            env::VarError::NotPresent => {
                SdkError::configuration(format!("Environment variable not set: {}", env_key))
            }
            env::VarError::NotUnicode(_) => SdkError::configuration(format!(
                "Environment variable is not valid unicode: {}",
                env_key
            )),
        })
    }
}

/// In-memory config provider for testing or static configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    /// Create a new empty memory config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory config provider with initial values
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Set a configuration value
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| SdkError::configuration(format!("Configuration key not found: {}", key)))
    }
}

/// A composite config provider that tries multiple providers in order
#[derive(Default)]
pub struct CompositeConfigProvider {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl CompositeConfigProvider {
    /// Create a new composite config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to the end of the chain
    pub fn add_provider(&mut self, provider: impl ConfigProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    /// Add a provider and return self (builder pattern)
    pub fn with(mut self, provider: impl ConfigProvider + 'static) -> Self {
        self.add_provider(provider);
        self
    }
}

impl ConfigProvider for CompositeConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.providers
            .iter()
            .find_map(|provider| provider.get_string(key).ok())
            .ok_or_else(|| {
                SdkError::configuration(format!(
                    "Configuration key not found in any provider: {}",
                    key
                ))
            })
    }
}

/// Settings accepted at SDK construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// API key sent as `X-Api-Key`
    pub api_key: String,

    /// Base URL all endpoints are resolved against
    pub base_url: String,

    /// Enables request/response logging
    pub debug: bool,

    /// Overall client timeout
    pub timeout: Duration,

    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            debug: false,
            timeout: DEFAULT_TIMEOUT,
            user_agent: UserAgent::default().to_string(),
        }
    }
}

impl SdkConfig {
    /// Create a configuration with the given API key and defaults elsewhere
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the process environment (`VISUAL_SEARCH_*`)
    pub fn from_env() -> Result<Self> {
        Self::from_provider(&EnvConfigProvider::new().with_prefix(ENV_PREFIX))
    }

    /// Load configuration from a config provider
    ///
    /// Unset keys fall back to their defaults; set but malformed values are
    /// reported as configuration errors.
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            api_key: provider.get_string("api_key")?,
            base_url: provider.get_string_or("base_url", &defaults.base_url),
            debug: provider.get_optional_bool("debug")?.unwrap_or(defaults.debug),
            timeout: provider
                .get_optional_duration("timeout")?
                .unwrap_or(defaults.timeout),
            user_agent: provider.get_string_or("user_agent", &defaults.user_agent),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate this configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(SdkError::configuration("API key is required"));
        }

        Url::parse(&self.base_url).map_err(|e| {
            SdkError::configuration(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;

        if self.timeout.is_zero() {
            return Err(SdkError::configuration("Timeout must be greater than zero"));
        }

        Ok(())
    }
}
