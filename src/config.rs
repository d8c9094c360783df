use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::itinerary::client::{
    API_KEY_ENV, ClientConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use crate::itinerary::error::ItineraryError;

pub const CONFIG_PATH_ENV: &str = "TRIPGEN_CONFIG";
pub const ENDPOINT_ENV: &str = "TRIPGEN_ENDPOINT";
pub const MODEL_ENV: &str = "TRIPGEN_MODEL";
pub const TIMEOUT_ENV: &str = "TRIPGEN_TIMEOUT";

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout: Option<u64>,
    pub api_key_env: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    profiles: Option<HashMap<String, ProfileConfig>>,
}

/// Values given explicitly by the caller, highest precedence.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Resolves client settings: overrides, then environment, then profile,
/// then built-in defaults. A timeout of `0` disables it.
pub fn resolve(overrides: &Overrides) -> Result<ClientConfig, ItineraryError> {
    let profile = match overrides.profile.as_deref() {
        Some(name) => load_profile(name).map_err(ItineraryError::Configuration)?,
        None => ProfileConfig::default(),
    };

    let endpoint = overrides
        .endpoint
        .clone()
        .or_else(|| env_value(ENDPOINT_ENV))
        .or(profile.endpoint)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let model = overrides
        .model
        .clone()
        .or_else(|| env_value(MODEL_ENV))
        .or(profile.model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let timeout = match overrides.timeout_secs {
        Some(timeout) => timeout,
        None => match env_value(TIMEOUT_ENV) {
            Some(raw) => parse_timeout(&raw)?,
            None => profile.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
        },
    };

    let api_key_env = profile
        .api_key_env
        .unwrap_or_else(|| API_KEY_ENV.to_string());
    let api_key = env_value(&api_key_env);

    Ok(ClientConfig {
        endpoint,
        model,
        timeout_secs: (timeout > 0).then_some(timeout),
        api_key,
        api_key_env,
    })
}

pub fn load_profile(name: &str) -> Result<ProfileConfig, String> {
    let path = config_path()?;
    let raw = fs::read_to_string(&path)
        .map_err(|err| format!("Failed to read config file '{}': {err}", path.display()))?;
    parse_profile(&raw, &path, name)
}

fn parse_profile(raw: &str, path: &Path, name: &str) -> Result<ProfileConfig, String> {
    let config: ConfigFile = toml::from_str(raw)
        .map_err(|err| format!("Failed to parse config file '{}': {err}", path.display()))?;

    let profiles = config.profiles.ok_or_else(|| {
        format!(
            "Config file '{}' does not contain a [profiles] section.",
            path.display()
        )
    })?;

    profiles.get(name).cloned().ok_or_else(|| {
        format!(
            "Profile '{}' not found in config file '{}'.",
            name,
            path.display()
        )
    })
}

fn parse_timeout(raw: &str) -> Result<u64, ItineraryError> {
    raw.parse().map_err(|_| {
        ItineraryError::Configuration(format!(
            "Invalid {TIMEOUT_ENV} '{raw}'. Expected a whole number of seconds."
        ))
    })
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn config_path() -> Result<PathBuf, String> {
    if let Some(path) = env_value(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Some(xdg) = env_value("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("tripgen").join("config.toml"));
    }

    let home = env::var("HOME").map_err(|_| {
        format!("Cannot resolve config path: set {CONFIG_PATH_ENV} or HOME/XDG_CONFIG_HOME.")
    })?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("tripgen")
        .join("config.toml"))
}
