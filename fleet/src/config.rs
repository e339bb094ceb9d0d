//! Client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_APK_LINK: &str = "https://votre-serveur.com/billun-app.apk";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got '{value}'")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root without trailing slash.
    pub api_base_url: String,
    pub poll_interval: Duration,
    /// Public URL of the Android APK.
    pub apk_link: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            apk_link: DEFAULT_APK_LINK.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build config from process environment variables.
    ///
    /// Optional:
    /// - `FLEET_API_URL`: backend root, default `http://127.0.0.1:8000`
    /// - `FLEET_POLL_INTERVAL_MS`: materials poll interval, default 2000
    /// - `FLEET_APK_LINK`: APK download URL
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same variables as [`Self::from_env`], captured at compile time. Used by
    /// the browser build, which has no process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a baked-in value fails to parse.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let baked = match key {
                "FLEET_API_URL" => option_env!("FLEET_API_URL"),
                "FLEET_POLL_INTERVAL_MS" => option_env!("FLEET_POLL_INTERVAL_MS"),
                "FLEET_APK_LINK" => option_env!("FLEET_APK_LINK"),
                _ => None,
            };
            baked.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a set variable fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_base_url = match get("FLEET_API_URL") {
            Some(url) => parse_url("FLEET_API_URL", &url)?,
            None => DEFAULT_API_BASE_URL.to_owned(),
        };
        let poll_interval = match get("FLEET_POLL_INTERVAL_MS") {
            Some(raw) => Duration::from_millis(parse_positive("FLEET_POLL_INTERVAL_MS", &raw)?),
            None => Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        };
        let apk_link = match get("FLEET_APK_LINK") {
            Some(url) => parse_url("FLEET_APK_LINK", &url)?,
            None => DEFAULT_APK_LINK.to_owned(),
        };

        Ok(Self { api_base_url, poll_interval, apk_link })
    }
}

fn parse_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Ok(raw.trim_end_matches('/').to_owned())
    } else {
        Err(ConfigError::InvalidUrl { var, value: raw.to_owned() })
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber { var, value: raw.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
