//! Plugin settings read from the `PLUGIN_*` environment that Drone provides.

use crate::error::PluginError;
use serde::{Deserialize, Deserializer};

/// Prefix Drone puts in front of every `settings:` key
pub const ENV_PREFIX: &str = "PLUGIN_";

/// Per-request deadline when `PLUGIN_TIMEOUT` is unset
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw plugin settings, every key optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PluginInput {
    pub api_key: Option<String>,
    pub dry_run: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub timeout: Option<u64>,
    pub metrics: Option<String>,
    pub events: Option<String>,
}

/// An empty setting (`timeout:` with no value) counts as unset
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("timeout {:?}: {}", raw, e))),
        _ => Ok(None),
    }
}

impl PluginInput {
    pub fn from_vars<I>(vars: I) -> Result<Self, PluginError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter(vars)?)
    }

    pub fn from_env() -> Result<Self, PluginError> {
        // Non-UTF-8 variables can't be plugin settings
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run.as_deref() == Some("true")
    }

    pub fn metrics_raw(&self) -> &str {
        self.metrics.as_deref().unwrap_or_default()
    }

    pub fn events_raw(&self) -> &str {
        self.events.as_deref().unwrap_or_default()
    }

    /// Credential and mode, enforcing the API key requirement for live runs
    pub fn config(&self) -> Result<Config, PluginError> {
        let config = Config {
            api_key: self.api_key.clone().unwrap_or_default(),
            dry_run: self.is_dry_run(),
            timeout_secs: self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        if config.api_key.is_empty() && !config.dry_run {
            return Err(PluginError::Config(
                "Datadog API Key is missing".to_string(),
            ));
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub dry_run: bool,
    pub timeout_secs: u64,
}

/// Resolve credential and mode from environment-style key/value pairs
pub fn resolve_config<I>(vars: I) -> Result<Config, PluginError>
where
    I: IntoIterator<Item = (String, String)>,
{
    PluginInput::from_vars(vars)?.config()
}
